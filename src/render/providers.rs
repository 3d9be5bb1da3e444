//! Dynamic collection providers
//!
//! Sections such as classes or events show records owned by other admin
//! modules. Providers fetch those records per tenant; the renderer binds
//! them into the chosen layout.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::{Record, RecordStore};

/// Collections served by [`ProviderRegistry::for_store`]
pub const DYNAMIC_COLLECTIONS: [&str; 5] = ["classes", "events", "announcements", "gallery", "courses"];

/// Source of one tenant-scoped collection
#[async_trait]
pub trait CollectionProvider: Send + Sync {
    /// Records of the tenant, at most `limit` when given
    async fn list_for_tenant(&self, tenant_id: &str, limit: Option<usize>) -> Result<Vec<Record>, StoreError>;
}

/// Serves a record store collection, filtered by the `tenantId` field
pub struct StoreCollectionProvider {
    store: Arc<dyn RecordStore>,
    collection: String,
}

impl StoreCollectionProvider {
    pub fn new(store: Arc<dyn RecordStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl CollectionProvider for StoreCollectionProvider {
    async fn list_for_tenant(&self, tenant_id: &str, limit: Option<usize>) -> Result<Vec<Record>, StoreError> {
        let records = self.store.list(&self.collection).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.get("tenantId").and_then(Value::as_str) == Some(tenant_id))
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}

/// Providers keyed by collection name
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CollectionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store-backed providers for every dynamic collection
    pub fn for_store(store: Arc<dyn RecordStore>) -> Self {
        let mut registry = Self::new();
        for collection in DYNAMIC_COLLECTIONS {
            registry.register(collection, Arc::new(StoreCollectionProvider::new(store.clone(), collection)));
        }
        registry
    }

    /// Add or replace the provider for a collection
    pub fn register(&mut self, collection: impl Into<String>, provider: Arc<dyn CollectionProvider>) -> &mut Self {
        self.providers.insert(collection.into(), provider);
        self
    }

    pub fn get(&self, collection: &str) -> Option<Arc<dyn CollectionProvider>> {
        self.providers.get(collection).cloned()
    }

    pub fn contains(&self, collection: &str) -> bool {
        self.providers.contains_key(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_store_provider_scopes_by_tenant() {
        let store = Arc::new(MemoryStore::new());
        for (tenant, name) in [("t1", "Math"), ("t2", "Art"), ("t1", "Science"), ("t1", "Music")] {
            store
                .insert("classes", json!({"tenantId": tenant, "name": name}).as_object().cloned().unwrap())
                .await
                .unwrap();
        }

        let registry = ProviderRegistry::for_store(store);
        let provider = registry.get("classes").unwrap();

        let all = provider.list_for_tenant("t1", None).await.unwrap();
        assert_eq!(all.len(), 3);

        let limited = provider.list_for_tenant("t1", Some(2)).await.unwrap();
        let names: Vec<_> = limited.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Math", "Science"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ProviderRegistry::for_store(Arc::new(MemoryStore::new()));
        for collection in DYNAMIC_COLLECTIONS {
            assert!(registry.contains(collection));
        }
        assert!(registry.get("jobs").is_none());
    }
}
