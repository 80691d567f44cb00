//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```
//! use status_kv::prelude::*;
//!
//! let client = StatusClient::new(MemoryItemStore::with_table("t", "id"), "t", "id");
//! client.store(1, "ready")?;
//! # Ok::<(), Error>(())
//! ```

// Unified error handling
pub use crate::error::{BackendError, Error, Result};

// Wire types
pub use crate::attribute::{AttributeValue, Item, Scalar, ScalarKind};
pub use crate::request::{DeleteItemRequest, GetItemRequest, GetItemResponse, PutItemRequest};

// Client and transports
pub use crate::client::{STATUS_ATTRIBUTE, StatusClient};
#[cfg(feature = "local")]
pub use crate::store::LocalItemStore;
pub use crate::store::{ItemStore, MemoryItemStore, StoreError};
