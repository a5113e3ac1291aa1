//! Collaborator seams for cart and catalog retrieval.
//!
//! The recommendation service does not read the store directly; it goes
//! through these traits so the data source can be swapped (in-memory store
//! here, a relational backend elsewhere) and so retrieval failures stay
//! distinguishable from scoring failures.

use crate::context::{resolve_cart_references, ReferenceProduct};
use std::sync::Arc;
use store::{Product, StoreIndex, UserId};

/// Resolves a user identity to their current cart reference products.
///
/// Implementations must exclude entries whose product has been deleted
/// from the catalog. An unknown user is an empty cart, not an error.
pub trait CartReader: Send + Sync {
    fn cart_references(&self, user_id: UserId) -> store::Result<Vec<ReferenceProduct>>;
}

/// Returns the full product catalog as a call-local snapshot.
pub trait CatalogReader: Send + Sync {
    fn catalog(&self) -> store::Result<Vec<Product>>;
}

/// Cart reader backed by the in-memory [`StoreIndex`]
#[derive(Clone)]
pub struct StoreCartReader {
    index: Arc<StoreIndex>,
}

impl StoreCartReader {
    pub fn new(index: Arc<StoreIndex>) -> Self {
        Self { index }
    }
}

impl CartReader for StoreCartReader {
    fn cart_references(&self, user_id: UserId) -> store::Result<Vec<ReferenceProduct>> {
        Ok(resolve_cart_references(&self.index, user_id))
    }
}

/// Catalog reader backed by the in-memory [`StoreIndex`]
#[derive(Clone)]
pub struct StoreCatalogReader {
    index: Arc<StoreIndex>,
}

impl StoreCatalogReader {
    pub fn new(index: Arc<StoreIndex>) -> Self {
        Self { index }
    }
}

impl CatalogReader for StoreCatalogReader {
    fn catalog(&self) -> store::Result<Vec<Product>> {
        Ok(self.index.catalog_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::CartEntry;

    fn seeded_index() -> Arc<StoreIndex> {
        let mut index = StoreIndex::new();
        index.insert_product(Product {
            id: 1,
            name: "Espresso Beans".to_string(),
            price: 14.5,
            category: "Coffee".to_string(),
            image: String::new(),
            description: String::new(),
        });
        index.insert_product(Product {
            id: 2,
            name: "Green Tea".to_string(),
            price: 8.0,
            category: "Tea".to_string(),
            image: String::new(),
            description: String::new(),
        });
        index.insert_cart_entry(CartEntry {
            user_id: 10,
            product_id: 1,
            quantity: 2,
        });
        Arc::new(index)
    }

    #[test]
    fn test_store_cart_reader_resolves_references() {
        let reader = StoreCartReader::new(seeded_index());
        let references = reader.cart_references(10).unwrap();

        assert_eq!(references.len(), 1);
        assert_eq!(references[0].id, 1);
        assert_eq!(references[0].category, "Coffee");
    }

    #[test]
    fn test_store_catalog_reader_returns_snapshot() {
        let reader = StoreCatalogReader::new(seeded_index());
        let catalog = reader.catalog().unwrap();

        assert_eq!(catalog.len(), 2);
    }
}
