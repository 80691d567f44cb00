//! In-process item store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::attribute::Item;
use crate::error::BackendError;
use crate::request::{DeleteItemRequest, GetItemRequest, GetItemResponse, PutItemRequest};

use super::error::StoreError;
use super::{ItemStore, item_record_key, lookup_record_key};

#[derive(Debug)]
struct Table {
    key_attribute: String,
    records: BTreeMap<String, Item>,
}

/// Item store held entirely in memory.
///
/// Tables must be created before use, each with the name of its key
/// attribute. Safe to share between threads.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with one table already created.
    pub fn with_table(table: &str, key_attribute: &str) -> Self {
        let tables = HashMap::from([(
            table.to_string(),
            Table {
                key_attribute: key_attribute.to_string(),
                records: BTreeMap::new(),
            },
        )]);
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Create a table keyed by `key_attribute`.
    pub fn create_table(&self, table: &str, key_attribute: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        if tables.contains_key(table) {
            return Err(StoreError::TableExists(table.to_string()));
        }
        tables.insert(
            table.to_string(),
            Table {
                key_attribute: key_attribute.to_string(),
                records: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Number of records in `table`, or `None` if it does not exist.
    pub fn record_count(&self, table: &str) -> Result<Option<usize>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.get(table).map(|t| t.records.len()))
    }

    fn put(&self, request: PutItemRequest) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;
        let record_key = item_record_key(&request.table_name, &table.key_attribute, &request.item)?;
        table.records.insert(record_key, request.item);
        Ok(())
    }

    fn get(&self, request: GetItemRequest) -> Result<GetItemResponse, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;
        let record_key = lookup_record_key(&request.table_name, &table.key_attribute, &request.key)?;
        Ok(GetItemResponse {
            item: table.records.get(&record_key).cloned(),
        })
    }

    fn delete(&self, request: DeleteItemRequest) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;
        let record_key = lookup_record_key(&request.table_name, &table.key_attribute, &request.key)?;
        table.records.remove(&record_key);
        Ok(())
    }
}

impl ItemStore for MemoryItemStore {
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
