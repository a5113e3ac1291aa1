//! Core traits for the candidate filtering stage.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the candidate pool before scoring.

use anyhow::Result;
use cart::CartContext;
use store::Product;

/// Core trait for filtering candidate products.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// `Send + Sync` allows filters to be shared across concurrent scoring
/// calls; filters take ownership of the candidate Vec and return the kept
/// subset, so no cloning happens between stages.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidate products.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The resolved cart the user currently holds
    ///
    /// # Returns
    /// * `Ok(Vec<Product>)` - The candidates that survive the filter
    /// * `Err` - If filtering fails
    fn apply(&self, candidates: Vec<Product>, context: &CartContext) -> Result<Vec<Product>>;
}
