#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for filing statement extraction.
//!
//! This crate provides the foundational abstractions shared by every stage:
//!
//! - [`HttpTransport`](transport::HttpTransport) - Network seam used by all stages
//! - [`DocumentStore`](store::DocumentStore) - Persistence seam for results
//! - [`DataError`](error::DataError) / [`PipelineError`](error::PipelineError) - Error taxonomy
//! - [`ExtractionResult`](types::ExtractionResult) and the statement types it carries

/// Error types for stages and the pipeline boundary.
pub mod error;
/// Annual report form designators.
pub mod form;
/// Document store trait.
pub mod store;
/// HTTP transport trait and an in-memory implementation.
pub mod transport;
/// Core data types (Ticker, Cik, statements, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DataError, PipelineError, Result, Stage};
pub use form::FormType;
pub use store::{DEFAULT_COLLECTION, DocumentStore, store_result};
pub use transport::{HttpResponse, HttpTransport, StaticTransport};
pub use types::{
    CIK_WIDTH, CashFlowStatement, Cik, DocumentReference, ExtractionResult, FilingReference,
    IncomeStatement, LINKBASE_MARKERS, LineValue, StatementSection, Ticker, XBRL_EXTENSION,
    is_primary_xbrl_path,
};
