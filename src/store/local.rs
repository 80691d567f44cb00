//! Persistent single-node item store backed by fjall.
//!
//! Each table lives in its own fjall keyspace; a `_meta` keyspace records
//! the store version and every table's key attribute. Items are stored as
//! their JSON wire form.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::attribute::Item;
use crate::error::BackendError;
use crate::logging::{debug, info};
use crate::request::{DeleteItemRequest, GetItemRequest, GetItemResponse, PutItemRequest};

use super::error::StoreError;
use super::{ItemStore, item_record_key, lookup_record_key};

/// Key prefix for table definitions in the metadata keyspace.
const META_TABLES_PREFIX: &str = "tables/";
const META_CONFIG_KEY: &str = "config";

/// Data keyspace prefix.
const DATA_PREFIX: &str = "data_";

/// Current store version.
const STORE_VERSION: u32 = 1;

/// Item store persisted on local disk.
pub struct LocalItemStore {
    db: fjall::Database,
    meta: Keyspace,
}

impl LocalItemStore {
    /// Open an existing store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace("_meta", KeyspaceCreateOptions::default)?;

        let Some(config) = meta.get(META_CONFIG_KEY)? else {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        };
        let version = u32::from_le_bytes(
            config
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::InvalidFormat("Invalid config format".to_string()))?,
        );
        if version != STORE_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }

        debug!(path = %path.display(), "opened local item store");
        Ok(Self { db, meta })
    }

    /// Initialize a store at the given path, creating it if needed.
    ///
    /// Initializing an existing store keeps its tables and records.
    pub fn init(path: &Path) -> Result<Self, StoreError> {
        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace("_meta", KeyspaceCreateOptions::default)?;

        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        db.persist(PersistMode::SyncAll)?;

        info!(path = %path.display(), "initialized local item store");
        Ok(Self { db, meta })
    }

    /// Open the store if it exists, otherwise initialize it.
    pub fn open_or_init(path: &Path) -> Result<Self, StoreError> {
        match Self::open(path) {
            Ok(store) => Ok(store),
            Err(StoreError::NotInitialized(_)) => Self::init(path),
            Err(e) => Err(e),
        }
    }

    /// Create a table keyed by `key_attribute`.
    ///
    /// Table names are limited to ASCII letters, digits, `_` and `-`.
    pub fn create_table(&self, table: &str, key_attribute: &str) -> Result<(), StoreError> {
        if table.is_empty()
            || !table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidFormat(format!(
                "Invalid table name '{}'",
                table
            )));
        }

        let meta_key = format!("{}{}", META_TABLES_PREFIX, table);
        if self.meta.get(&meta_key)?.is_some() {
            return Err(StoreError::TableExists(table.to_string()));
        }

        self.meta.insert(&meta_key, key_attribute.as_bytes())?;
        let _ = self.data_keyspace(table)?;
        self.db.persist(PersistMode::SyncAll)?;

        info!(table = table, key_attribute = key_attribute, "created table");
        Ok(())
    }

    /// Key attribute of `table`, or `None` if the table does not exist.
    pub fn table_key_attribute(&self, table: &str) -> Result<Option<String>, StoreError> {
        let meta_key = format!("{}{}", META_TABLES_PREFIX, table);
        let Some(bytes) = self.meta.get(&meta_key)? else {
            return Ok(None);
        };
        String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|_| StoreError::InvalidFormat(format!("Invalid key attribute for '{}'", table)))
    }

    /// Names of all tables, in key order.
    pub fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let mut tables = Vec::new();
        for kv in self.meta.prefix(META_TABLES_PREFIX) {
            let Ok(key_bytes) = kv.key() else {
                continue;
            };
            let key_str = String::from_utf8_lossy(&key_bytes);
            if let Some(name) = key_str.strip_prefix(META_TABLES_PREFIX) {
                tables.push(name.to_string());
            }
        }
        Ok(tables)
    }

    fn data_keyspace(&self, table: &str) -> Result<Keyspace, StoreError> {
        let keyspace_name = format!("{}{}", DATA_PREFIX, table);
        Ok(self.db.keyspace(&keyspace_name, KeyspaceCreateOptions::default)?)
    }

    fn table(&self, table: &str) -> Result<(String, Keyspace), StoreError> {
        let key_attribute = self
            .table_key_attribute(table)?
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok((key_attribute, self.data_keyspace(table)?))
    }

    fn put(&self, request: PutItemRequest) -> Result<(), StoreError> {
        let (key_attribute, ks) = self.table(&request.table_name)?;
        let record_key = item_record_key(&request.table_name, &key_attribute, &request.item)?;
        let bytes = serde_json::to_vec(&request.item)?;

        ks.insert(&record_key, bytes.as_slice())?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn get(&self, request: GetItemRequest) -> Result<GetItemResponse, StoreError> {
        let (key_attribute, ks) = self.table(&request.table_name)?;
        let record_key = lookup_record_key(&request.table_name, &key_attribute, &request.key)?;

        let Some(bytes) = ks.get(&record_key)? else {
            return Ok(GetItemResponse::empty());
        };
        let item: Item = serde_json::from_slice(&bytes)?;
        Ok(GetItemResponse::found(item))
    }

    fn delete(&self, request: DeleteItemRequest) -> Result<(), StoreError> {
        let (key_attribute, ks) = self.table(&request.table_name)?;
        let record_key = lookup_record_key(&request.table_name, &key_attribute, &request.key)?;

        ks.remove(&record_key)?;
        self.db.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

impl ItemStore for LocalItemStore {
    fn put_item(&self, request: PutItemRequest) -> Result<(), BackendError> {
        Ok(self.put(request)?)
    }

    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse, BackendError> {
        Ok(self.get(request)?)
    }

    fn delete_item(&self, request: DeleteItemRequest) -> Result<(), BackendError> {
        Ok(self.delete(request)?)
    }
}
