#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Latest annual cash-flow and income statements from SEC EDGAR filings.
//!
//! This crate ties the stages together behind [`FinancialsPipeline`] and
//! re-exports the core types, the EDGAR client and the store implementations.
//!
//! # Features
//!
//! - `sqlite` - SQLite-based document store (default)
//!
//! # Example
//!
//! ```no_run
//! use statements::{EdgarConfig, FinancialsPipeline, InMemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = FinancialsPipeline::new(EdgarConfig::new("MyApp/1.0 (contact@example.com)"))?
//!         .with_store(Arc::new(InMemoryStore::new()));
//!
//!     let result = pipeline.extract_and_store("AAPL").await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use statements_core::*;

// Store implementations
#[cfg(feature = "sqlite")]
pub use statements_store::SqliteStore;
pub use statements_store::{InMemoryStore, NoopStore};

// EDGAR stages
pub use statements_edgar::{
    EdgarClient, EdgarConfig, ExtractedStatements, ReqwestTransport, SelectionPolicy,
};

mod pipeline;
pub use pipeline::FinancialsPipeline;
