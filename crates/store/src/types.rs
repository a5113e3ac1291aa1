//! Core domain types for the store.
//!
//! This module defines the product catalog and cart structures used
//! throughout the system, plus the in-memory `StoreIndex` that holds
//! both and answers lookups.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user ids with product ids

/// Unique identifier for a catalog product
pub type ProductId = u32;

/// Unique identifier for a store user
pub type UserId = u32;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Immutable for the duration of a scoring call; the catalog handed to the
/// recommender is a snapshot taken fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Upstream data is not always clean, so deserialization
    /// accepts a number or a numeric string and coerces anything else to 0.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Free-text category label, compared case-insensitively. An empty
    /// label never matches another label.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// Deserialize a price that may arrive as a number, a numeric string, or
/// garbage. Anything that does not parse to a finite float becomes 0.
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match &value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}

// =============================================================================
// CartEntry
// =============================================================================

/// One row of a user's cart: a product reference plus how many the user
/// holds. Quantity matters for checkout, never for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

// =============================================================================
// StoreIndex - The In-Memory Store
// =============================================================================

/// Holds the product catalog and all user carts, with a secondary index
/// from lowercased category label to product ids.
///
/// Methods return references; callers that need a call-local snapshot
/// (the recommender does) clone explicitly via [`StoreIndex::catalog_snapshot`].
#[derive(Debug, Default)]
pub struct StoreIndex {
    // Primary data stores
    pub(crate) products: HashMap<ProductId, Product>,
    pub(crate) carts: HashMap<UserId, Vec<CartEntry>>,

    // Secondary index for category browsing
    pub(crate) category_index: HashMap<String, Vec<ProductId>>,
}

impl StoreIndex {
    /// Creates a new, empty StoreIndex
    pub fn new() -> Self {
        Self::default()
    }

    // Getters

    /// Get a product by id
    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Get all cart entries for a user.
    ///
    /// Returns an empty slice for users with no cart; an unknown user and
    /// an empty cart are indistinguishable, and neither is an error.
    pub fn get_cart_entries(&self, user_id: UserId) -> &[CartEntry] {
        self.carts
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all product ids in a category (case-insensitive label)
    pub fn get_products_by_category(&self, category: &str) -> &[ProductId] {
        self.category_index
            .get(&category.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All product ids currently in the catalog
    pub fn all_product_ids(&self) -> Vec<ProductId> {
        self.products.keys().copied().collect()
    }

    /// Clone the full catalog into a call-local snapshot.
    ///
    /// The recommender works on owned snapshots so a scoring call never
    /// observes catalog mutation mid-computation.
    pub fn catalog_snapshot(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    // Mutators - used during data loading

    /// Insert a product into the catalog
    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Insert a cart entry.
    ///
    /// Entries for the same (user, product) pair merge by summing
    /// quantities, so a cart never holds two rows for one product.
    pub fn insert_cart_entry(&mut self, entry: CartEntry) {
        let cart = self.carts.entry(entry.user_id).or_default();
        match cart.iter_mut().find(|e| e.product_id == entry.product_id) {
            Some(existing) => existing.quantity += entry.quantity,
            None => cart.push(entry),
        }
    }

    /// Get counts for logging/validation: (products, carts, cart entries)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_entries = self.carts.values().map(|v| v.len()).sum();
        (self.products.len(), self.carts.len(), total_entries)
    }
}
