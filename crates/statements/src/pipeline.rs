//! End-to-end extraction pipeline: ticker → CIK → annual filing → XBRL
//! document → statements.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use statements_core::{
    DEFAULT_COLLECTION, DataError, DocumentStore, ExtractionResult, PipelineError, Stage, Ticker,
    store_result,
};
use statements_edgar::{EdgarClient, EdgarConfig};

/// Runs every stage for a ticker and maps stage outcomes to [`PipelineError`].
///
/// A stage that comes up empty yields [`PipelineError::NotFound`] tagged with
/// that stage; any other failure becomes [`PipelineError::Upstream`]. Stages run
/// one after another and nothing is cached between calls.
///
/// # Example
///
/// ```no_run
/// use statements::{EdgarConfig, FinancialsPipeline};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = FinancialsPipeline::new(EdgarConfig::new("MyApp/1.0 (contact@example.com)"))?;
///
///     let result = pipeline.extract_financials("AAPL").await?;
///     println!("{} ({}) from {}", result.ticker, result.cik, result.source);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FinancialsPipeline {
    client: EdgarClient,
    store: Option<Arc<dyn DocumentStore>>,
    collection: String,
}

impl std::fmt::Debug for FinancialsPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinancialsPipeline")
            .field("client", &self.client)
            .field("store", &self.store.as_ref().map(|_| "configured"))
            .field("collection", &self.collection)
            .finish()
    }
}

impl FinancialsPipeline {
    /// Create a pipeline that talks to EDGAR over the network.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: EdgarConfig) -> Result<Self, DataError> {
        Ok(Self::with_client(EdgarClient::new(config)?))
    }

    /// Create a pipeline over an existing client.
    #[must_use]
    pub fn with_client(client: EdgarClient) -> Self {
        Self {
            client,
            store: None,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Set the store used by [`extract_and_store`](Self::extract_and_store).
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the collection results are written to.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Returns the underlying EDGAR client.
    #[must_use]
    pub const fn client(&self) -> &EdgarClient {
        &self.client
    }

    /// Returns the collection results are written to.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Extracts the latest annual cash-flow and income statements for `ticker`.
    ///
    /// # Errors
    /// Returns [`PipelineError::NotFound`] if the ticker has no CIK, the CIK has
    /// no annual filing, the filing has no primary XBRL document, or either
    /// statement comes back with no values at all. Every other failure is
    /// returned as [`PipelineError::Upstream`].
    #[instrument(skip(self))]
    pub async fn extract_financials(&self, ticker: &str) -> Result<ExtractionResult, PipelineError> {
        let Some(cik) = self.client.resolve_cik(ticker).await? else {
            return Err(PipelineError::not_found(ticker, Stage::Identifier));
        };
        debug!(cik = %cik, "Resolved identifier");

        let Some(filing) = self.client.latest_annual_filing(&cik).await? else {
            return Err(PipelineError::not_found(ticker, Stage::Filing));
        };
        debug!(index = %filing.index_url, "Located annual filing");

        let Some(source) = self.client.primary_document(&filing.index_url).await? else {
            return Err(PipelineError::not_found(ticker, Stage::Document));
        };
        debug!(source = %source, "Located XBRL document");

        let statements = self.client.extract_statements(&source).await?;
        if statements.cashflow.all_absent() {
            return Err(PipelineError::not_found(ticker, Stage::CashFlow));
        }
        if statements.income_statement.all_absent() {
            return Err(PipelineError::not_found(ticker, Stage::IncomeStatement));
        }

        info!(
            cik = %cik,
            cashflow_items = statements.cashflow.present_count(),
            "Extracted financial statements"
        );
        Ok(ExtractionResult {
            ticker: Ticker::new(ticker),
            cik,
            source,
            cashflow: statements.cashflow,
            income_statement: statements.income_statement,
            filing_date: filing.filing_date,
            report_date: filing.report_date,
        })
    }

    /// Runs [`extract_financials`](Self::extract_financials) and writes the
    /// result to the configured store.
    ///
    /// Storing is best effort: a missing store or a failed write is logged and
    /// the extracted result is still returned.
    ///
    /// # Errors
    /// Returns the errors of [`extract_financials`](Self::extract_financials).
    pub async fn extract_and_store(&self, ticker: &str) -> Result<ExtractionResult, PipelineError> {
        let result = self.extract_financials(ticker).await?;

        match &self.store {
            Some(store) => {
                if let Err(e) = store_result(store.as_ref(), &result, &self.collection).await {
                    warn!(ticker = %result.ticker, "Failed to store extraction result: {}", e);
                } else {
                    debug!(ticker = %result.ticker, collection = %self.collection, "Stored extraction result");
                }
            }
            None => debug!("No store configured, skipping persistence"),
        }

        Ok(result)
    }
}
