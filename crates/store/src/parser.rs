//! Parsers for the store data files.
//!
//! Two JSON files back the store:
//! - `products.json`: array of catalog products
//! - `carts.json`: flat array of cart entries (user_id, product_id, quantity)
//!
//! Price fields tolerate dirty upstream data (numeric strings, nulls,
//! garbage); see the lenient deserializer on [`Product`].

use crate::error::{Result, StoreError};
use crate::types::{CartEntry, Product};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(StoreError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| StoreError::Json {
        file: path.display().to_string(),
        source,
    })
}

/// Parse the product catalog file
pub fn parse_products(path: &Path) -> Result<Vec<Product>> {
    read_json(path)
}

/// Parse the cart entries file
pub fn parse_cart_entries(path: &Path) -> Result<Vec<CartEntry>> {
    read_json(path)
}
