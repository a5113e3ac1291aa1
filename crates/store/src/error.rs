//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur while loading or validating store data.
///
/// Every failure to produce a catalog or cart snapshot surfaces as one of
/// these variants; callers treat them as retrieval failures, distinct from
/// anything the scoring engine itself can raise.
#[derive(Error, Debug)]
pub enum StoreError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file couldn't be parsed as JSON
    #[error("Failed to parse {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
