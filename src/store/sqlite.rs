//! SQLite record store
//!
//! Every collection shares one table; each row holds a record's JSON body.
//!
//! ## Tables
//!
//! - `records` - (collection, id) primary key, JSON `body`, insertion `seq`
//! - `schema_version` - single-row schema version

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{assign_id, merge_into, Record, RecordStore};
use crate::error::StoreError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS records (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection);
"#;

/// SQLite-backed [`RecordStore`]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database file
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        info!("Opening record store at {:?}", path);

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Backend(format!("Failed to open SQLite: {}", e)))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| StoreError::Backend(format!("Failed to set PRAGMA: {}", e)))?;

        Self::with_schema(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        debug!("Opening in-memory record store");

        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Backend(format!("Failed to open in-memory SQLite: {}", e)))?;

        Self::with_schema(conn)
    }

    fn with_schema(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;

        let current: Option<i32> = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get::<_, Option<i32>>(0)
            })
            .optional()?
            .flatten();

        if current.is_none() {
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
            info!("Initialized record store schema v{}", SCHEMA_VERSION);
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    fn with_conn_mut<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))?;
        f(&mut conn)
    }

    /// Stored schema version
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })?)
        })
    }
}

fn parse_body(body: &str) -> Result<Record, StoreError> {
    Ok(serde_json::from_str(body)?)
}

fn load(conn: &Connection, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM records WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;

    body.as_deref().map(parse_body).transpose()
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY seq")?;
            let bodies = stmt
                .query_map(params![collection], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;

            bodies.iter().map(|b| parse_body(b)).collect()
        })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.with_conn(|conn| load(conn, collection, id))
    }

    async fn insert(&self, collection: &str, mut record: Record) -> Result<Record, StoreError> {
        let id = assign_id(&mut record);
        let body = serde_json::to_string(&record)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO records (collection, id, body) VALUES (?1, ?2, ?3)",
                params![collection, id, body],
            )
            .map_err(|e| StoreError::Backend(format!("Insert {}/{} failed: {}", collection, id, e)))?;
            Ok(())
        })?;

        Ok(record)
    }

    async fn update(&self, collection: &str, id: &str, patch: Record) -> Result<Record, StoreError> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let mut current = load(&tx, collection, id)?.ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
            merge_into(&mut current, patch);

            tx.execute(
                "UPDATE records SET body = ?3 WHERE collection = ?1 AND id = ?2",
                params![collection, id, serde_json::to_string(&current)?],
            )?;
            tx.commit()?;

            Ok(current)
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM records WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;

            if removed == 0 {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_schema_initialized() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for slug in ["home", "about", "contact"] {
            store
                .insert("pages", record(json!({"id": slug, "slug": slug})))
                .await
                .unwrap();
        }
        store.insert("schools", record(json!({"id": "s1"}))).await.unwrap();

        let pages = store.list("pages").await.unwrap();
        let slugs: Vec<_> = pages.iter().map(|p| p["slug"].as_str().unwrap()).collect();
        assert_eq!(slugs, vec!["home", "about", "contact"]);
    }

    #[tokio::test]
    async fn test_update_merges_top_level() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert("pages", record(json!({"id": "p1", "title": "Home", "slug": "home"})))
            .await
            .unwrap();

        let updated = store
            .update("pages", "p1", record(json!({"title": "Welcome"})))
            .await
            .unwrap();
        assert_eq!(updated["slug"], "home");

        let stored = store.get("pages", "p1").await.unwrap().unwrap();
        assert_eq!(stored["title"], "Welcome");
    }

    #[tokio::test]
    async fn test_missing_records() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("pages", "nope").await.unwrap().is_none());
        assert!(matches!(
            store.delete("pages", "nope").await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.update("pages", "nope", Record::new()).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_reopen_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert("schools", record(json!({"id": "s1", "name": "Hill"}))).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let school = store.get("schools", "s1").await.unwrap().unwrap();
        assert_eq!(school["name"], "Hill");
    }
}
