//! Error types for filing resolution and statement extraction.
//!
//! Two layers are defined here:
//!
//! - [`DataError`] covers everything that can go wrong inside a single stage:
//!   transport failures, unexpected HTTP statuses, malformed JSON or markup and
//!   document store failures. Stages return `Result<Option<T>>`, so a clean
//!   "nothing found" is never a `DataError`.
//! - [`PipelineError`] is the client-facing taxonomy produced only by the
//!   orchestrator: either a typed [`PipelineError::NotFound`] tagged with the
//!   failing [`Stage`], or an [`PipelineError::Upstream`] wrapping any other
//!   failure with its message preserved.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while fetching or parsing filing data.
#[derive(Error, Debug)]
pub enum DataError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// An endpoint answered with a non-success status where one was required.
    #[error("HTTP {status} from {url}")]
    Http {
        /// The requested URL.
        url: String,
        /// The returned status code.
        status: u16,
    },

    /// Error parsing JSON or other structured data from an endpoint.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error reading an XML document.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error interacting with the document store.
    #[error("Store error: {0}")]
    Store(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;

/// Pipeline stage at which a ticker could not be carried any further.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Ticker to CIK resolution.
    Identifier,
    /// Locating the latest annual filing.
    Filing,
    /// Locating the primary XBRL document inside the filing index.
    Document,
    /// Cash-flow extraction produced no values at all.
    CashFlow,
    /// Income-statement extraction produced no values at all.
    IncomeStatement,
}

impl Stage {
    /// Short human-readable description used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Identifier => "CIK not found",
            Self::Filing => "no annual filing found",
            Self::Document => "no XBRL document found",
            Self::CashFlow => "could not parse cash flow",
            Self::IncomeStatement => "could not parse income statement",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identifier => "identifier",
            Self::Filing => "filing",
            Self::Document => "document",
            Self::CashFlow => "cash_flow",
            Self::IncomeStatement => "income_statement",
        };
        f.write_str(name)
    }
}

/// Errors surfaced to callers of the extraction pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The ticker could not be carried through one of the stages.
    #[error("{} for ticker '{ticker}'", stage.describe())]
    NotFound {
        /// The requested ticker.
        ticker: String,
        /// The stage that came up empty.
        stage: Stage,
    },

    /// Any unclassified failure, with the original message preserved.
    #[error("Unexpected upstream error: {0}")]
    Upstream(String),
}

impl PipelineError {
    /// Creates a not-found error for the given ticker and stage.
    #[must_use]
    pub fn not_found(ticker: impl Into<String>, stage: Stage) -> Self {
        Self::NotFound {
            ticker: ticker.into(),
            stage,
        }
    }

    /// Returns true for client-facing "not found" conditions.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the failing stage for not-found errors.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::NotFound { stage, .. } => Some(*stage),
            Self::Upstream(_) => None,
        }
    }
}

impl From<DataError> for PipelineError {
    fn from(err: DataError) -> Self {
        Self::Upstream(err.to_string())
    }
}
