//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the FilterPipeline struct that chains filters
//! together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use cart::CartContext;
use store::Product;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new().add_filter(InCartFilter);
/// let eligible = pipeline.apply(catalog_snapshot, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidate products to filter
    /// * `context` - Cart context for filtering decisions
    ///
    /// # Returns
    /// * `Ok(Vec<Product>)` - The candidates surviving every filter
    /// * `Err` - If any filter fails
    pub fn apply(&self, candidates: Vec<Product>, context: &CartContext) -> Result<Vec<Product>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::InCartFilter;
    use cart::ReferenceProduct;

    fn product(id: u32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price: 5.0,
            category: "misc".to_string(),
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = CartContext::default();

        let candidates = vec![product(1), product(2)];

        let filtered = pipeline.apply(candidates.clone(), &context).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let context = CartContext::from_references(vec![ReferenceProduct {
            id: 1,
            price: 5.0,
            category: "misc".to_string(),
        }]);

        let pipeline = FilterPipeline::new().add_filter(InCartFilter);

        let candidates = vec![product(1), product(2)];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }
}
