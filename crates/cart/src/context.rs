//! Cart context building.
//!
//! The recommender scores candidates against the products a user currently
//! holds. This module resolves a user's cart entries to those reference
//! products and precomputes the id set used to exclude cart products from
//! the candidate pool.

use std::collections::HashSet;
use store::{Product, ProductId, StoreIndex, UserId};
use tracing::warn;

/// A cart entry resolved to the attributes scoring needs.
///
/// Only identity, price and category matter for similarity; quantity is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProduct {
    pub id: ProductId,
    pub price: f64,
    pub category: String,
}

impl From<&Product> for ReferenceProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            price: product.price,
            category: product.category.clone(),
        }
    }
}

/// A user's cart, resolved and ready for scoring.
///
/// Holds the reference products plus a HashSet of their ids for O(1)
/// exclusion lookups. Both are call-local snapshots; the context is never
/// retained across scoring calls.
#[derive(Debug, Clone, Default)]
pub struct CartContext {
    /// Products currently in the cart, used as similarity anchors
    pub references: Vec<ReferenceProduct>,
    /// Ids of the cart products, for excluding them from candidates
    pub product_ids: HashSet<ProductId>,
}

impl CartContext {
    /// Build a context from already-resolved reference products
    pub fn from_references(references: Vec<ReferenceProduct>) -> Self {
        let product_ids = references.iter().map(|r| r.id).collect();
        Self {
            references,
            product_ids,
        }
    }

    /// True when the cart holds nothing — no basis for similarity
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Resolve a user's cart entries to reference products.
///
/// Entries whose product no longer exists in the catalog are skipped with
/// a warning: a deleted product must not act as a similarity anchor. One
/// reference is produced per entry regardless of quantity. An unknown user
/// resolves to an empty list.
pub fn resolve_cart_references(index: &StoreIndex, user_id: UserId) -> Vec<ReferenceProduct> {
    let mut references = Vec::new();
    for entry in index.get_cart_entries(user_id) {
        match index.get_product(entry.product_id) {
            Some(product) => references.push(ReferenceProduct::from(product)),
            None => warn!(
                "Skipping cart entry for user {}: product {} no longer in catalog",
                user_id, entry.product_id
            ),
        }
    }
    references
}

/// Build the full cart context for a user
pub fn build_cart_context(index: &StoreIndex, user_id: UserId) -> CartContext {
    CartContext::from_references(resolve_cart_references(index, user_id))
}
