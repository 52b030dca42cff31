//! No-op document store implementation.

use async_trait::async_trait;
use serde_json::Value;
use statements_core::{DocumentStore, Result};
use tracing::trace;

/// A no-op store that doesn't keep anything.
///
/// `get` returns `Ok(None)`, `remove` returns `Ok(false)` and writes succeed
/// without effect. Useful for disabling persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl NoopStore {
    /// Create a new no-op store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for NoopStore {
    async fn put(&self, _collection: &str, _key: &str, _document: &Value) -> Result<()> {
        trace!("NoopStore: put called, doing nothing");
        Ok(())
    }

    async fn get(&self, _collection: &str, _key: &str) -> Result<Option<Value>> {
        trace!("NoopStore: get called, returning None");
        Ok(None)
    }

    async fn remove(&self, _collection: &str, _key: &str) -> Result<bool> {
        trace!("NoopStore: remove called, returning false");
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopStore: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_noop_store_keeps_nothing() {
        let store = NoopStore::new();

        assert!(store.put("c", "AAPL", &json!({"a": 1})).await.is_ok());
        assert!(store.get("c", "AAPL").await.unwrap().is_none());
        assert!(!store.remove("c", "AAPL").await.unwrap());
        assert!(store.clear().await.is_ok());
    }
}
