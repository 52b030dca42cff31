//! Document store trait for persisting extraction results.
//!
//! This module defines the [`DocumentStore`] trait: a minimal keyed JSON
//! document contract (collection + key → document). Persisting a result is a
//! side effect the pipeline never depends on.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{DataError, Result},
    types::ExtractionResult,
};

/// Collection extraction results are written to unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "company_financials";

/// Trait for keyed JSON document storage.
///
/// Writes to an existing key replace the previous document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `document` under `key` in `collection`.
    async fn put(&self, collection: &str, key: &str, document: &Value) -> Result<()>;

    /// Reads the document stored under `key` in `collection`.
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Removes the document stored under `key`, returning whether one existed.
    async fn remove(&self, collection: &str, key: &str) -> Result<bool>;

    /// Clears every collection.
    async fn clear(&self) -> Result<()>;
}

/// Writes `result` to `store`, keyed by its ticker.
///
/// # Errors
/// Returns [`DataError::InvalidParameter`] if the result has no ticker, and
/// propagates serialization and store failures.
pub async fn store_result(
    store: &dyn DocumentStore,
    result: &ExtractionResult,
    collection: &str,
) -> Result<()> {
    if result.ticker.is_empty() {
        return Err(DataError::InvalidParameter(
            "Ticker not found in extraction result".to_string(),
        ));
    }

    let document = serde_json::to_value(result).map_err(|e| DataError::Parse(e.to_string()))?;
    store
        .put(collection, result.ticker.as_str(), &document)
        .await
}
