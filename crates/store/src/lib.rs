//! # Store Crate
//!
//! In-memory product store: the catalog, user carts, and the loaders that
//! fill both from JSON data files.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Product, CartEntry, StoreIndex)
//! - **parser**: Parse the JSON data files into Rust structs
//! - **index**: Load, index and validate the store
//! - **error**: Error types for store retrieval
//!
//! ## Example Usage
//!
//! ```ignore
//! use store::StoreIndex;
//! use std::path::Path;
//!
//! let index = StoreIndex::load_from_files(Path::new("data/store"))?;
//!
//! let product = index.get_product(1).unwrap();
//! let cart = index.get_cart_entries(10);
//! println!("{} holds {} cart entries", product.name, cart.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{Result, StoreError};
pub use types::{CartEntry, Product, ProductId, StoreIndex, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_index_creation() {
        let index = StoreIndex::new();
        let (products, carts, entries) = index.counts();

        assert_eq!(products, 0);
        assert_eq!(carts, 0);
        assert_eq!(entries, 0);
    }

    #[test]
    fn test_counts_after_inserts() {
        let mut index = StoreIndex::new();

        index.insert_product(Product {
            id: 1,
            name: "French Press".to_string(),
            price: 24.0,
            category: "Equipment".to_string(),
            image: "img/press.jpg".to_string(),
            description: "8-cup glass press".to_string(),
        });
        index.insert_cart_entry(CartEntry {
            user_id: 10,
            product_id: 1,
            quantity: 1,
        });

        let (products, carts, entries) = index.counts();
        assert_eq!(products, 1);
        assert_eq!(carts, 1);
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_empty_queries() {
        let index = StoreIndex::new();

        assert!(index.get_product(999).is_none());
        assert!(index.get_cart_entries(999).is_empty());
        assert!(index.get_products_by_category("coffee").is_empty());
        assert!(index.catalog_snapshot().is_empty());
    }
}
