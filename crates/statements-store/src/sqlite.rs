//! SQLite-based document store implementation.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use statements_core::{DataError, DocumentStore, Result};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, instrument};

/// SQLite-based document store.
///
/// Documents are kept as JSON text in a single `documents` table keyed by
/// collection and key, so results survive application restarts.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| DataError::Store(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Create an in-memory SQLite store.
    ///
    /// Useful for testing; data is lost when the store is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DataError::Store(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| DataError::Store(e.to_string()))
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                body TEXT NOT NULL,
                stored_at TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            )",
            [],
        )
        .map_err(|e| DataError::Store(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_stored_at
             ON documents(stored_at)",
            [],
        )
        .map_err(|e| DataError::Store(e.to_string()))?;

        debug!("SQLite store schema initialized");
        Ok(())
    }

    /// Removes documents written more than `age` ago.
    ///
    /// Returns the number of documents removed.
    ///
    /// # Errors
    /// Returns an error if `age` is out of range or the delete fails.
    #[instrument(skip(self))]
    pub fn remove_older_than(&self, age: Duration) -> Result<usize> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(age)
                .map_err(|e| DataError::Store(format!("Invalid age: {}", e)))?;
        let cutoff_str = cutoff.to_rfc3339();

        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE stored_at < ?1",
                params![cutoff_str],
            )
            .map_err(|e| DataError::Store(e.to_string()))?;

        debug!("Removed {} stale documents", removed);
        Ok(removed)
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    #[instrument(skip(self, document))]
    async fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()> {
        let stored_at = Utc::now().to_rfc3339();
        let body = serde_json::to_string(document).map_err(|e| DataError::Parse(e.to_string()))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO documents (collection, key, body, stored_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![collection, key, body, stored_at],
        )
        .map_err(|e| DataError::Store(e.to_string()))?;

        debug!("Stored document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        let result = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| DataError::Store(e.to_string()))?;

        match result {
            Some(json) => {
                let document =
                    serde_json::from_str(&json).map_err(|e| DataError::Parse(e.to_string()))?;
                debug!("Found stored document");
                Ok(Some(document))
            }
            None => {
                debug!("No stored document found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn remove(&self, collection: &str, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
            )
            .map_err(|e| DataError::Store(e.to_string()))?;
        Ok(removed > 0)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM documents", [])
            .map_err(|e| DataError::Store(e.to_string()))?;
        debug!("Cleared SQLite store");
        Ok(())
    }
}
