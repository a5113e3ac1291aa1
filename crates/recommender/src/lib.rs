//! Content-based recommendation engine for cart and catalog snapshots.
//!
//! This crate provides:
//! - Price normalization and weighted category/price similarity
//! - Filter trait and the cart-exclusion filter
//! - FilterPipeline for composing filters
//! - The ranking engine producing top-N scored candidates
//!
//! ## Architecture
//! A scoring call processes a catalog snapshot in stages:
//! 1. Filters drop ineligible candidates (products already in the cart)
//! 2. Each remaining candidate is scored against every cart reference
//!    product and the similarities averaged
//! 3. Candidates are ranked by score and the top N returned
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{Recommender, DEFAULT_TOP_N};
//! use cart::build_cart_context;
//!
//! let context = build_cart_context(&index, user_id);
//! let catalog = index.catalog_snapshot();
//!
//! let engine = Recommender::new();
//! let picks = engine.recommend(&context, &catalog, DEFAULT_TOP_N)?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod scoring;
pub mod engine;

// Re-export main types
pub use engine::{Recommender, RecommendError, ScoredCandidate, DEFAULT_TOP_N};
pub use filter_pipeline::FilterPipeline;
pub use scoring::{category_similarity, similarity, PriceRange, SimilarityWeights};
pub use traits::Filter;
