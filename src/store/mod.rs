//! Item store transports.
//!
//! [`ItemStore`] is the narrow put/get/delete seam the client talks to. A
//! remote backend plugs in by implementing it; the crate also ships two
//! reference stores that honor the same semantics (upsert on put, absence
//! on get, idempotent delete, one key attribute per table).

mod error;
#[cfg(feature = "local")]
mod local;
mod memory;

use std::sync::Arc;

use crate::attribute::{AttributeValue, Item};
use crate::error::BackendError;
use crate::request::{DeleteItemRequest, GetItemRequest, GetItemResponse, PutItemRequest};

pub use error::StoreError;
#[cfg(feature = "local")]
pub use local::LocalItemStore;
pub use memory::MemoryItemStore;

/// Transport capability the client is generic over.
///
/// Each call is one synchronous round trip. Implementations own any
/// connection handling, retries and timeouts.
pub trait ItemStore {
    /// Create or overwrite a record.
    fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError>;

    /// Fetch a record; an absent record is an empty response, not an error.
    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse, BackendError>;

    /// Remove a record. Removing a missing record succeeds.
    fn delete_item(&self, request: DeleteItemRequest) -> Result<(), BackendError>;
}

impl<T: ItemStore + ?Sized> ItemStore for &T {
    fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        (**self).put_item(request)
    }

    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse, BackendError> {
        (**self).get_item(request)
    }

    fn delete_item(&self, request: DeleteItemRequest) -> Result<(), BackendError> {
        (**self).delete_item(request)
    }
}

impl<T: ItemStore + ?Sized> ItemStore for Arc<T> {
    fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        (**self).put_item(request)
    }

    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse, BackendError> {
        (**self).get_item(request)
    }

    fn delete_item(&self, request: DeleteItemRequest) -> Result<(), BackendError> {
        (**self).delete_item(request)
    }
}

impl<T: ItemStore + ?Sized> ItemStore for Box<T> {
    fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        (**self).put_item(request)
    }

    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse, BackendError> {
        (**self).get_item(request)
    }

    fn delete_item(&self, request: DeleteItemRequest) -> Result<(), BackendError> {
        (**self).delete_item(request)
    }
}

/// Storage key for the record an item belongs to.
///
/// The key attribute's tagged form is used verbatim, so `N "1"` and
/// `S "1"` address different records.
fn item_record_key(table: &str, key_attribute: &str, item: &Item) -> Result<String, StoreError> {
    let attr = item
        .get(key_attribute)
        .ok_or_else(|| StoreError::MissingKeyAttribute {
            table: table.to_string(),
            attribute: key_attribute.to_string(),
        })?;
    encode_record_key(attr)
}

/// Storage key for a get/delete key map, which must hold exactly the key
/// attribute.
fn lookup_record_key(table: &str, key_attribute: &str, key: &Item) -> Result<String, StoreError> {
    if key.len() != 1 {
        return Err(StoreError::InvalidKey {
            table: table.to_string(),
            expected: key_attribute.to_string(),
            found: key.keys().cloned().collect(),
        });
    }
    item_record_key(table, key_attribute, key).map_err(|_| StoreError::InvalidKey {
        table: table.to_string(),
        expected: key_attribute.to_string(),
        found: key.keys().cloned().collect(),
    })
}

fn encode_record_key(attr: &AttributeValue) -> Result<String, StoreError> {
    Ok(serde_json::to_string(attr)?)
}
