//! Filter implementations for the candidate pool.
//!
//! This module contains the concrete filter implementations that can be
//! composed into a FilterPipeline. Cart exclusion is the one mandatory
//! stage; the trait keeps the pipeline open for stock or availability
//! filters.

pub mod in_cart;

// Re-export for convenience
pub use in_cart::InCartFilter;
