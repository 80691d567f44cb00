//! Tests for the fjall-backed local item store.

#![cfg(feature = "local")]

use status_kv::{LocalItemStore, Scalar, StatusClient, StoreError};
use tempfile::TempDir;

fn init_store() -> (TempDir, LocalItemStore) {
    let dir = TempDir::new().unwrap();
    let store = LocalItemStore::init(dir.path()).unwrap();
    store.create_table("statuses", "id").unwrap();
    (dir, store)
}

#[test]
fn open_requires_init() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nothing-here");
    assert!(matches!(
        LocalItemStore::open(&missing),
        Err(StoreError::NotInitialized(_))
    ));
}

#[test]
fn create_table_records_key_attribute() {
    let (_dir, store) = init_store();
    assert_eq!(store.table_key_attribute("statuses").unwrap().as_deref(), Some("id"));
    assert_eq!(store.table_key_attribute("other").unwrap(), None);
    assert_eq!(store.list_tables().unwrap(), vec!["statuses".to_string()]);
    assert!(matches!(
        store.create_table("statuses", "id"),
        Err(StoreError::TableExists(_))
    ));
}

#[test]
fn create_table_rejects_bad_names() {
    let (_dir, store) = init_store();
    assert!(matches!(
        store.create_table("has space", "id"),
        Err(StoreError::InvalidFormat(_))
    ));
    assert!(matches!(
        store.create_table("", "id"),
        Err(StoreError::InvalidFormat(_))
    ));
}

#[test]
fn client_roundtrip() {
    let (_dir, store) = init_store();
    let client = StatusClient::new(&store, "statuses", "id");

    client.store("foo", 7).unwrap();
    client.store(1, "bar").unwrap();

    assert_eq!(client.fetch_value("foo").unwrap(), Some(Scalar::Int(7)));
    assert_eq!(client.fetch_value(1).unwrap(), Some(Scalar::from("bar")));
    assert_eq!(client.fetch_value("1").unwrap(), None);

    client.store("foo", "overwritten").unwrap();
    assert_eq!(
        client.fetch_value("foo").unwrap(),
        Some(Scalar::from("overwritten"))
    );

    client.delete("foo").unwrap();
    client.delete("foo").unwrap();
    assert_eq!(client.fetch_raw("foo").unwrap(), None);
}

#[test]
fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = LocalItemStore::init(dir.path()).unwrap();
        store.create_table("statuses", "id").unwrap();
        StatusClient::new(&store, "statuses", "id")
            .store("job", 3)
            .unwrap();
    }

    let store = LocalItemStore::open(dir.path()).unwrap();
    let client = StatusClient::new(store, "statuses", "id");
    assert_eq!(client.fetch_value("job").unwrap(), Some(Scalar::Int(3)));
}

#[test]
fn unknown_table_is_backend_error() {
    let (_dir, store) = init_store();
    let client = StatusClient::new(&store, "missing", "id");
    let err = client.store("a", 1).unwrap_err();
    assert!(err.is_backend());
    assert!(err.to_string().contains("Table not found: missing"));
}

#[test]
fn wrong_key_attribute_is_backend_error() {
    let (_dir, store) = init_store();
    let client = StatusClient::new(&store, "statuses", "pk");
    assert!(client.store("a", 1).unwrap_err().is_backend());
    assert!(client.fetch_value("a").unwrap_err().is_backend());
}
