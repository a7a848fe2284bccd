//! Document persistence for the CareLog engine
//!
//! All data lives in one JSON document whose top-level keys are collection
//! names mapping to arrays of records. The store owns no domain semantics; it
//! only stores, replaces and removes documents keyed by an id field.
//!
//! # Example
//!
//! ```rust
//! use database_layer::{collections, DocumentStore, InMemoryStore, UpsertOutcome};
//! use serde_json::json;
//!
//! let store = InMemoryStore::new();
//! let item = json!({"id": "p-1", "name": "token"});
//! let outcome = store
//!     .upsert(collections::PATIENTS, "id", item.as_object().cloned().unwrap_or_default())
//!     .unwrap();
//!
//! assert_eq!(outcome, UpsertOutcome::Inserted);
//! assert!(store.get_by_id(collections::PATIENTS, "id", "p-1").unwrap().is_some());
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod json_store;
pub mod memory_store;
pub mod store;

pub use config::{StoreConfig, DEFAULT_DATA_FILE};
pub use error::{StorageError, StorageResult};
pub use json_store::JsonFileStore;
pub use memory_store::InMemoryStore;
pub use store::{Document, DocumentStore, Snapshot, UpsertOutcome};
