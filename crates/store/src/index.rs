//! StoreIndex building and indexing logic.
//!
//! Loads the catalog and carts from disk, builds the category index, and
//! validates the result before handing it out.

use crate::error::{Result, StoreError};
use crate::parser;
use crate::types::StoreIndex;
use std::path::Path;
use tracing::{info, warn};

impl StoreIndex {
    /// Load the store from a data directory.
    ///
    /// Expects `products.json` and `carts.json` inside `data_dir`. Both
    /// files are parsed in parallel, then the category index is built and
    /// the data validated.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let products_path = data_dir.join("products.json");
        let carts_path = data_dir.join("carts.json");

        let (products, entries) = rayon::join(
            || parser::parse_products(&products_path),
            || parser::parse_cart_entries(&carts_path),
        );
        let products = products?;
        let entries = entries?;

        info!(
            "Loaded {} products and {} cart entries",
            products.len(),
            entries.len()
        );

        let mut index = StoreIndex::new();
        for product in products {
            index.insert_product(product);
        }
        for entry in entries {
            index.insert_cart_entry(entry);
        }

        index.build_category_index();
        index.validate()?;

        Ok(index)
    }

    /// Build the category index after primary data is loaded.
    ///
    /// Labels are keyed lowercased so lookups are case-insensitive; an
    /// empty label is not indexed at all.
    pub fn build_category_index(&mut self) {
        self.category_index.clear();
        for (product_id, product) in &self.products {
            let label = product.category.trim().to_lowercase();
            if label.is_empty() {
                continue;
            }
            self.category_index.entry(label).or_default().push(*product_id);
        }
        // Deterministic ordering inside each category bucket
        for ids in self.category_index.values_mut() {
            ids.sort_unstable();
        }
    }

    /// Validate store integrity.
    ///
    /// Cart entries must carry a positive quantity. Entries referencing a
    /// product no longer in the catalog are tolerated (the product was
    /// deleted after the cart row was written); the cart reader skips them
    /// later, so here they only produce a warning.
    pub fn validate(&self) -> Result<()> {
        let mut dangling = 0usize;
        for entries in self.carts.values() {
            for entry in entries {
                if entry.quantity == 0 {
                    return Err(StoreError::InvalidValue {
                        field: "quantity".to_string(),
                        value: entry.quantity.to_string(),
                    });
                }
                if !self.products.contains_key(&entry.product_id) {
                    dangling += 1;
                }
            }
        }
        if dangling > 0 {
            warn!(
                "{} cart entries reference products missing from the catalog",
                dangling
            );
        }
        Ok(())
    }
}
