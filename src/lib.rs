//! Typed status storage over attribute-typed item stores.
//!
//! This library stores one scalar "status" per key in a table of a remote
//! item store, converting between native scalars and the backend's tagged
//! attributes (`{"N": "7"}`, `{"S": "foo"}`) on every call.
//!
//! # Quick Start
//!
//! ```
//! use status_kv::prelude::*;
//!
//! let store = MemoryItemStore::with_table("jobs", "id");
//! let client = StatusClient::new(store, "jobs", "id");
//!
//! client.store("build-42", 200)?;
//! assert_eq!(client.fetch_value("build-42")?, Some(Scalar::Int(200)));
//!
//! client.delete("build-42")?;
//! assert_eq!(client.fetch_value("build-42")?, None);
//! # Ok::<(), status_kv::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`attribute`] - Scalars and the tagged-attribute wire form
//! - [`request`] - Put/get/delete request and response envelopes
//! - [`store`] - The [`ItemStore`] transport trait and reference stores
//! - [`client`] - The typed [`StatusClient`]
//! - [`config`] - TOML configuration (requires `config` feature)
//!
//! # Feature Flags
//!
//! - `local` - Enable the fjall-backed [`LocalItemStore`] (enabled by default)
//! - `config` - Enable TOML configuration loading
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

pub mod attribute;
pub mod client;
#[cfg(feature = "config")]
pub mod config;
mod error;
mod logging;
pub mod prelude;
pub mod request;
pub mod store;

// Re-export the unified error type
pub use error::{BackendError, Error, Result};

pub use attribute::{AttributeValue, Item, Scalar, ScalarKind};
pub use client::{STATUS_ATTRIBUTE, StatusClient};
pub use request::{DeleteItemRequest, GetItemRequest, GetItemResponse, PutItemRequest};
#[cfg(feature = "local")]
pub use store::LocalItemStore;
pub use store::{ItemStore, MemoryItemStore, StoreError};

#[cfg(feature = "config")]
pub use config::{Config, ConfigError};
