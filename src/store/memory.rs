//! In-memory record store

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use super::{assign_id, merge_into, Record, RecordStore};
use crate::error::StoreError;

/// Concurrent in-process store.
///
/// Records are kept per collection in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map(|c| c.len()).unwrap_or(0)
    }
}

fn position(records: &[Record], id: &str) -> Option<usize> {
    records
        .iter()
        .position(|r| super::record_id(r) == Some(id))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .map(|c| c.clone())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.collections.get(collection).and_then(|records| {
            position(&records, id).map(|i| records[i].clone())
        }))
    }

    async fn insert(&self, collection: &str, mut record: Record) -> Result<Record, StoreError> {
        let id = assign_id(&mut record);
        let mut records = self.collections.entry(collection.to_string()).or_default();

        if position(&records, &id).is_some() {
            return Err(StoreError::Backend(format!(
                "duplicate id {} in {}",
                id, collection
            )));
        }

        trace!(collection, id = %id, "Inserting record");
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, collection: &str, id: &str, patch: Record) -> Result<Record, StoreError> {
        let not_found = || StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        };

        let mut records = self.collections.get_mut(collection).ok_or_else(not_found)?;
        let index = position(&records, id).ok_or_else(not_found)?;

        trace!(collection, id, "Updating record");
        merge_into(&mut records[index], patch);
        Ok(records[index].clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        };

        let mut records = self.collections.get_mut(collection).ok_or_else(not_found)?;
        let index = position(&records, id).ok_or_else(not_found)?;

        trace!(collection, id, "Deleting record");
        records.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = MemoryStore::new();

        let inserted = store
            .insert("pages", record(json!({"title": "Home"})))
            .await
            .unwrap();
        let id = inserted["id"].as_str().unwrap().to_string();

        let updated = store
            .update("pages", &id, record(json!({"title": "Welcome"})))
            .await
            .unwrap();
        assert_eq!(updated["title"], "Welcome");

        assert_eq!(store.list("pages").await.unwrap().len(), 1);

        store.delete("pages", &id).await.unwrap();
        assert!(store.get("pages", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_record() {
        let store = MemoryStore::new();
        let err = store
            .update("pages", "nope", Record::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.delete("pages", "nope").await.is_err());
        assert!(store.list("pages").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        store.insert("pages", record(json!({"id": "p1"}))).await.unwrap();
        assert!(store.insert("pages", record(json!({"id": "p1"}))).await.is_err());
        assert_eq!(store.count("pages"), 1);
    }
}
