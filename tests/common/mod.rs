//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use school_portal::store::{Record, RecordStore};
use school_portal::{MemoryStore, PageService, StoreError};
use school_portal::services::EventBus;

/// Memory store that records page writes and can fail or hold them
pub struct TestStore {
    inner: MemoryStore,
    updates: Mutex<Vec<(String, Record)>>,
    fail_updates: AtomicBool,
    fail_deletes: AtomicBool,
    insert_budget: AtomicUsize,
    gated: AtomicBool,
    gate: Semaphore,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            updates: Mutex::new(Vec::new()),
            fail_updates: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            insert_budget: AtomicUsize::new(usize::MAX),
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
        })
    }

    /// Number of `update` calls that reached the backing store
    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Bodies of successful updates, oldest first
    pub fn updates(&self) -> Vec<(String, Record)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Let `n` more inserts through, then reject the rest
    pub fn fail_inserts_after(&self, n: usize) {
        self.insert_budget.store(n, Ordering::SeqCst);
    }

    /// Hold every following update until [`TestStore::release`]
    pub fn hold_updates(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gated.store(false, Ordering::SeqCst);
        self.gate.add_permits(1024);
    }

    pub async fn insert_json(&self, collection: &str, value: Value) -> Record {
        let record = value.as_object().cloned().expect("object");
        self.inner.insert(collection, record).await.unwrap()
    }
}

#[async_trait]
impl RecordStore for TestStore {
    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn insert(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        let admitted = self
            .insert_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match n {
                usize::MAX => Some(n),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok();
        if !admitted {
            return Err(StoreError::Backend("insert rejected".into()));
        }
        self.inner.insert(collection, record).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Record) -> Result<Record, StoreError> {
        if self.gated.load(Ordering::SeqCst) {
            let permit = self.gate.acquire().await.map_err(|e| StoreError::Backend(e.to_string()))?;
            permit.forget();
        }
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("update rejected".into()));
        }

        let updated = self.inner.update(collection, id, patch.clone()).await?;
        self.updates.lock().unwrap().push((id.to_string(), patch));
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("delete rejected".into()));
        }
        self.inner.delete(collection, id).await
    }
}

pub fn page_service(store: Arc<TestStore>) -> Arc<PageService> {
    Arc::new(PageService::new(store, Arc::new(EventBus::new())))
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("object")
}
