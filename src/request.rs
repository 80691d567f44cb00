//! Request and response envelopes exchanged with an item store.
//!
//! Field names serialize in the backend's PascalCase form, so a put looks
//! like `{"TableName": "t", "Item": {"id": {"S": "foo"}}}`.

use serde::{Deserialize, Serialize};

use crate::attribute::Item;

/// Create or overwrite the record identified by the item's key attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: Item,
}

/// Look up one record by its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: Item,
}

/// Remove one record by its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemRequest {
    pub table_name: String,
    pub key: Item,
}

/// Result of a get. `item` is `None` when no record matched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl GetItemResponse {
    pub fn found(item: Item) -> Self {
        Self { item: Some(item) }
    }

    pub fn empty() -> Self {
        Self { item: None }
    }
}
