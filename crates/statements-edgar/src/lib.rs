#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR filing resolution and XBRL statement extraction.
//!
//! This crate provides each stage of the extraction pipeline as a method of
//! [`EdgarClient`]:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Latest annual filing discovery from the submissions API
//! - Primary XBRL document lookup on the filing index page
//! - Cash-flow and income statement extraction with tag fallbacks
//!
//! # Example
//!
//! ```no_run
//! use statements_edgar::{EdgarClient, EdgarConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new(EdgarConfig::new("MyApp/1.0 (contact@example.com)"))?;
//!
//!     let cik = client.resolve_cik("AAPL").await?.ok_or("unknown ticker")?;
//!     let filing = client.latest_annual_filing(&cik).await?.ok_or("no 10-K")?;
//!     let document = client
//!         .primary_document(&filing.index_url)
//!         .await?
//!         .ok_or("no XBRL document")?;
//!
//!     let statements = client.extract_statements(&document).await?;
//!     for (label, value) in statements.cashflow.iter() {
//!         println!("{label}: {value}");
//!     }
//!
//!     Ok(())
//! }
//! ```

/// HTTP transport and the EDGAR client.
pub mod client;
/// Client configuration and endpoint URLs.
pub mod config;
mod documents;
/// Statement extraction and derivation rules.
pub mod extract;
mod filings;
/// XML and HTML fact indexing.
pub mod markup;
mod resolver;
/// XBRL tag dictionary.
pub mod tags;

pub use client::{EdgarClient, ReqwestTransport};
pub use config::{
    COMPANY_TICKERS_URL, DEFAULT_REQUEST_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
    EDGAR_ARCHIVES_URL, EDGAR_DATA_URL, EdgarConfig, SelectionPolicy,
};
pub use extract::{ExtractedStatements, apply_derivations};
pub use markup::{FactIndex, Markup};
pub use tags::{IncomeSection, TagEntry};
