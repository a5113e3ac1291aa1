//! Filter to remove products the user already holds in their cart.
//!
//! This runs before any scoring: a product in the cart must never appear
//! among the recommendations, whatever its similarity score would be.

use crate::traits::Filter;
use anyhow::Result;
use cart::CartContext;
use store::Product;

/// Removes candidates whose id is in the cart.
///
/// ## Algorithm
/// Uses the HashSet in CartContext.product_ids for O(1) lookups.
pub struct InCartFilter;

impl Filter for InCartFilter {
    fn name(&self) -> &str {
        "InCartFilter"
    }

    fn apply(&self, candidates: Vec<Product>, context: &CartContext) -> Result<Vec<Product>> {
        let filtered: Vec<Product> = candidates
            .into_iter()
            .filter(|candidate| !context.product_ids.contains(&candidate.id))
            .collect();
        Ok(filtered)
    }
}
