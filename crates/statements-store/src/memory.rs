//! In-memory document store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use statements_core::{DocumentStore, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Stored document with the time it was written.
#[derive(Debug, Clone)]
struct StoredDocument {
    body: Value,
    stored_at: DateTime<Utc>,
}

impl StoredDocument {
    fn new(body: Value) -> Self {
        Self {
            body,
            stored_at: Utc::now(),
        }
    }
}

/// Key of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    collection: String,
    key: String,
}

impl DocumentKey {
    fn new(collection: &str, key: &str) -> Self {
        Self {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }
}

/// Simple in-memory document store for testing and development.
///
/// Documents are kept in an `RwLock`-protected `HashMap` and are lost when the
/// store is dropped. Documents are cloned on get/put.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<DocumentKey, StoredDocument>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Returns when the document under `key` was last written.
    pub async fn stored_at(&self, collection: &str, key: &str) -> Option<DateTime<Utc>> {
        self.documents
            .read()
            .await
            .get(&DocumentKey::new(collection, key))
            .map(|doc| doc.stored_at)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    #[instrument(skip(self, document))]
    async fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(
            DocumentKey::new(collection, key),
            StoredDocument::new(document.clone()),
        );
        debug!("Stored document");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let documents = self.documents.read().await;
        match documents.get(&DocumentKey::new(collection, key)) {
            Some(doc) => {
                debug!("Store hit");
                Ok(Some(doc.body.clone()))
            }
            None => {
                debug!("Store miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn remove(&self, collection: &str, key: &str) -> Result<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&DocumentKey::new(collection, key)).is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.documents.write().await.clear();
        debug!("Cleared in-memory store");
        Ok(())
    }
}
