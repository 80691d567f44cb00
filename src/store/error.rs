//! Error types for the reference item stores.

use thiserror::Error;

/// Errors raised by [`MemoryItemStore`](super::MemoryItemStore) and
/// [`LocalItemStore`](super::LocalItemStore).
///
/// These reach client callers wrapped in [`Error::Backend`](crate::Error).
#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "local")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Item for table '{table}' is missing key attribute '{attribute}'")]
    MissingKeyAttribute { table: String, attribute: String },

    #[error("Key for table '{table}' must contain only '{expected}', got {found:?}")]
    InvalidKey {
        table: String,
        expected: String,
        found: Vec<String>,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Store not initialized at {0}")]
    NotInitialized(String),

    #[error("Store lock poisoned")]
    Poisoned,
}
