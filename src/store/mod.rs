//! Record store interface
//!
//! The portal persists through a generic collection-of-JSON-records store.
//! Pages are stored whole (sections embedded); tenant branding is read from
//! the `schools` collection.
//!
//! ## Backends
//!
//! - [`MemoryStore`] - concurrent in-process map, default for tests
//! - [`SqliteStore`] - single-table SQLite file

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Collection holding [`Page`](crate::model::Page) records
pub const PAGES: &str = "pages";

/// Collection holding one record per school (tenant)
pub const SCHOOLS: &str = "schools";

/// A stored record: a JSON object with a string `id`
pub type Record = serde_json::Map<String, Value>;

/// Generic CRUD over named collections
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in a collection
    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    /// A single record by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError>;

    /// Insert a record. A missing or empty `id` is generated.
    async fn insert(&self, collection: &str, record: Record) -> Result<Record, StoreError>;

    /// Shallow-merge `patch` into an existing record's top-level keys
    async fn update(&self, collection: &str, id: &str, patch: Record) -> Result<Record, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Typed entity stored as one record in a fixed collection
pub trait StoredRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Collection name (e.g. "pages")
    fn collection() -> &'static str;

    /// The record id of this instance
    fn record_id(&self) -> &str;

    fn to_record(&self) -> Result<Record, StoreError> {
        to_record(self)
    }

    fn from_record(record: Record) -> Result<Self, StoreError> {
        from_record(record)
    }
}

/// Serialize a value that must be a JSON object
pub fn to_record<T: Serialize + ?Sized>(value: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

/// The record's `id` field, if it is a non-empty string
pub fn record_id(record: &Record) -> Option<&str> {
    record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Ensure the record has an id, generating a UUID when absent
pub(crate) fn assign_id(record: &mut Record) -> String {
    match record_id(record) {
        Some(id) => id.to_string(),
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            record.insert("id".into(), Value::String(id.clone()));
            id
        }
    }
}

/// Top-level shallow merge; the record id is never overwritten
pub(crate) fn merge_into(target: &mut Record, patch: Record) {
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        target.insert(key, value);
    }
}
