//! # Cart Crate
//!
//! Resolves user carts into the inputs the recommender consumes.
//!
//! ## Components
//!
//! ### Cart context
//! A user's cart entries resolved to reference products (id, price,
//! category) plus the id set used to keep cart products out of the
//! candidate pool. Deleted products are dropped during resolution.
//!
//! ### Readers
//! The `CartReader` / `CatalogReader` collaborator traits and their
//! in-memory store implementations. The recommendation service depends on
//! the traits, never on the store directly.
//!
//! ## Example Usage
//!
//! ```ignore
//! use cart::{build_cart_context, StoreCartReader, StoreCatalogReader};
//! use store::StoreIndex;
//! use std::sync::Arc;
//!
//! let index = Arc::new(StoreIndex::load_from_files("data/store".as_ref())?);
//! let context = build_cart_context(&index, user_id);
//! ```

// Public modules
pub mod context;
pub mod readers;

// Re-export commonly used types
pub use context::{build_cart_context, resolve_cart_references, CartContext, ReferenceProduct};
pub use readers::{CartReader, CatalogReader, StoreCartReader, StoreCatalogReader};
