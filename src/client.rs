//! Typed status client.
//!
//! [`StatusClient`] binds an [`ItemStore`] to one table and one primary-key
//! attribute, and stores a single scalar under the fixed `status` attribute
//! of each record. Keys and values are tagged on the way out; only the
//! status is decoded on the way back.

use crate::attribute::{AttributeValue, Item, Scalar};
use crate::error::Result;
use crate::logging::{debug, trace, warn};
use crate::request::{DeleteItemRequest, GetItemRequest, PutItemRequest};
use crate::store::ItemStore;

/// Attribute name holding the stored value of every record.
pub const STATUS_ATTRIBUTE: &str = "status";

/// Stateless typed accessor over an item store.
///
/// Every operation issues exactly one request and holds no state between
/// calls, so the client is as thread-safe as its store.
///
/// # Example
///
/// ```
/// use status_kv::{MemoryItemStore, Scalar, StatusClient};
///
/// let client = StatusClient::new(MemoryItemStore::with_table("jobs", "id"), "jobs", "id");
/// client.store("build-42", 200).unwrap();
/// assert_eq!(client.fetch_value("build-42").unwrap(), Some(Scalar::Int(200)));
/// ```
#[derive(Debug, Clone)]
pub struct StatusClient<S> {
    backend: S,
    table_name: String,
    key_attribute: String,
}

impl<S: ItemStore> StatusClient<S> {
    /// Bind `backend` to `table_name`, keyed by `key_attribute`.
    pub fn new(backend: S, table_name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            backend,
            table_name: table_name.into(),
            key_attribute: key_attribute.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    /// The underlying item store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Create or overwrite the status stored under `key`.
    pub fn store(&self, key: impl Into<Scalar>, value: impl Into<Scalar>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        debug!(table = %self.table_name, key = %key, value = %value, "storing status");

        let mut item = self.key_map(&key);
        item.insert(STATUS_ATTRIBUTE.to_string(), AttributeValue::from(value));

        let request = PutItemRequest {
            table_name: self.table_name.clone(),
            item,
        };
        trace!(request = ?request, "put_item");
        self.backend.put_item(request)?;
        Ok(())
    }

    /// Return the record stored under `key` exactly as the store sent it.
    ///
    /// `None` when there is no record. Prefer [`fetch_value`](Self::fetch_value).
    pub fn fetch_raw(&self, key: impl Into<Scalar>) -> Result<Option<Item>> {
        let key = key.into();
        debug!(table = %self.table_name, key = %key, "fetching raw record");
        self.lookup(&key)
    }

    /// Same as [`fetch_raw`](Self::fetch_raw).
    #[deprecated(since = "0.1.0", note = "use `fetch_value`, or `fetch_raw` for the raw record")]
    pub fn get(&self, key: impl Into<Scalar>) -> Result<Option<Item>> {
        self.fetch_raw(key)
    }

    /// Return the decoded status stored under `key`.
    ///
    /// A missing record and a record without a `status` attribute both give
    /// `Ok(None)`. Numeric statuses are cast leniently (see
    /// [`cast_integer`](crate::attribute::cast_integer)), so decoding never
    /// fails; only the transport can.
    pub fn fetch_value(&self, key: impl Into<Scalar>) -> Result<Option<Scalar>> {
        let key = key.into();
        debug!(table = %self.table_name, key = %key, "fetching status");

        let Some(mut item) = self.lookup(&key)? else {
            return Ok(None);
        };
        let Some(status) = item.remove(STATUS_ATTRIBUTE) else {
            warn!(table = %self.table_name, key = %key, "record has no status attribute");
            return Ok(None);
        };
        Ok(Some(status.decode()))
    }

    /// Remove the record stored under `key`. Missing keys are not an error.
    pub fn delete(&self, key: impl Into<Scalar>) -> Result<()> {
        let key = key.into();
        debug!(table = %self.table_name, key = %key, "deleting status");

        let request = DeleteItemRequest {
            table_name: self.table_name.clone(),
            key: self.key_map(&key),
        };
        trace!(request = ?request, "delete_item");
        self.backend.delete_item(request)?;
        Ok(())
    }

    fn lookup(&self, key: &Scalar) -> Result<Option<Item>> {
        let request = GetItemRequest {
            table_name: self.table_name.clone(),
            key: self.key_map(key),
        };
        trace!(request = ?request, "get_item");
        let response = self.backend.get_item(request)?;
        if response.item.is_none() {
            debug!(table = %self.table_name, key = %key, "no record");
        }
        Ok(response.item)
    }

    fn key_map(&self, key: &Scalar) -> Item {
        Item::from([(self.key_attribute.clone(), key.to_attribute())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryItemStore;

    fn client() -> StatusClient<MemoryItemStore> {
        StatusClient::new(MemoryItemStore::with_table("jobs", "id"), "jobs", "id")
    }

    #[test]
    fn test_store_then_fetch_value() {
        let client = client();
        client.store("a", 7).unwrap();
        client.store(3, "done").unwrap();

        assert_eq!(client.fetch_value("a").unwrap(), Some(Scalar::Int(7)));
        assert_eq!(client.fetch_value(3).unwrap(), Some(Scalar::from("done")));
    }

    #[test]
    fn test_integer_and_string_keys_do_not_collide() {
        let client = client();
        client.store(1, "int key").unwrap();
        client.store("1", "str key").unwrap();

        assert_eq!(client.fetch_value(1).unwrap(), Some(Scalar::from("int key")));
        assert_eq!(client.fetch_value("1").unwrap(), Some(Scalar::from("str key")));
    }

    #[test]
    fn test_store_overwrites_and_retypes() {
        let client = client();
        client.store("a", 7).unwrap();
        client.store("a", "seven").unwrap();
        assert_eq!(client.fetch_value("a").unwrap(), Some(Scalar::from("seven")));
    }

    #[test]
    fn test_delete_then_fetch() {
        let client = client();
        client.store("a", 1).unwrap();
        client.delete("a").unwrap();
        assert_eq!(client.fetch_value("a").unwrap(), None);
        assert_eq!(client.fetch_raw("a").unwrap(), None);
        client.delete("a").unwrap();
    }

    #[test]
    fn test_fetch_raw_returns_full_record() {
        let client = client();
        client.store("a", 5).unwrap();
        let item = client.fetch_raw("a").unwrap().unwrap();
        assert_eq!(item.get("id"), Some(&AttributeValue::S("a".to_string())));
        assert_eq!(item.get(STATUS_ATTRIBUTE), Some(&AttributeValue::N("5".to_string())));
    }

    #[test]
    fn test_backend_error_propagates() {
        let client = StatusClient::new(MemoryItemStore::new(), "missing", "id");
        let err = client.store("a", 1).unwrap_err();
        assert!(err.is_backend());
        assert!(client.fetch_value("a").unwrap_err().is_backend());
    }
}
