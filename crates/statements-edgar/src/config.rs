//! EDGAR client configuration.

use statements_core::{Cik, FormType};
use std::time::Duration;

/// SEC EDGAR API base URL
pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";

/// SEC archive host, which also serves filing index pages
pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov";

/// SEC company tickers URL
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default user agent. The SEC rejects requests that do not identify the caller.
pub const DEFAULT_USER_AGENT: &str = "statements/0.1 (contact@example.com)";

/// Default rate limit: 10 requests per second (SEC requirement)
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the filing locator picks "the latest" annual filing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    /// First matching entry in the order the registry returns them
    /// (the registry lists most recent first).
    #[default]
    ScanOrder,
    /// Matching entry with the greatest filing date. Ties and undated entries
    /// keep registry order.
    LatestFilingDate,
}

/// Settings for talking to EDGAR.
///
/// Built once at startup and handed to the client; nothing here is global.
///
/// # Example
/// ```
/// use statements_edgar::{EdgarConfig, SelectionPolicy};
/// use std::time::Duration;
///
/// let config = EdgarConfig::new("MyApp/1.0 (contact@example.com)")
///     .with_selection(SelectionPolicy::LatestFilingDate)
///     .with_timeout(Duration::from_secs(60));
/// assert_eq!(config.user_agent, "MyApp/1.0 (contact@example.com)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgarConfig {
    /// User agent sent with every request ("AppName/Version (contact@email.com)").
    pub user_agent: String,
    /// Base URL of the submissions API.
    pub data_base_url: String,
    /// Base URL of the filing archives.
    pub archives_base_url: String,
    /// URL of the ticker → CIK registry.
    pub tickers_url: String,
    /// Annual report designator to look for.
    pub annual_form: FormType,
    /// Latest-filing selection policy.
    pub selection: SelectionPolicy,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Minimum spacing between consecutive requests.
    pub request_interval: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            data_base_url: EDGAR_DATA_URL.to_string(),
            archives_base_url: EDGAR_ARCHIVES_URL.to_string(),
            tickers_url: COMPANY_TICKERS_URL.to_string(),
            annual_form: FormType::default(),
            selection: SelectionPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            request_interval: DEFAULT_REQUEST_INTERVAL,
        }
    }
}

impl EdgarConfig {
    /// Creates a configuration with the given user agent and SEC defaults.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    /// Points every endpoint at `base_url` (useful for mirrors and tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.data_base_url = base.to_string();
        self.archives_base_url = base.to_string();
        self.tickers_url = format!("{base}/files/company_tickers.json");
        self
    }

    /// Sets the annual report designator.
    #[must_use]
    pub const fn with_annual_form(mut self, form: FormType) -> Self {
        self.annual_form = form;
        self
    }

    /// Sets the latest-filing selection policy.
    #[must_use]
    pub const fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum spacing between requests.
    #[must_use]
    pub const fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    /// URL of the submissions document for `id` (a padded CIK or a ticker guess).
    #[must_use]
    pub fn submissions_url(&self, id: &str) -> String {
        format!("{}/submissions/CIK{}.json", self.data_base_url, id)
    }

    /// URL of the index page of the filing `accession` by `cik`.
    #[must_use]
    pub fn filing_index_url(&self, cik: &Cik, accession: &str) -> String {
        format!(
            "{}/Archives/edgar/data/{}/{}/{}-index.html",
            self.archives_base_url,
            cik.unpadded(),
            accession.replace('-', ""),
            accession
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EdgarConfig::default();
        assert_eq!(config.annual_form, FormType::TenK);
        assert_eq!(config.selection, SelectionPolicy::ScanOrder);
        assert_eq!(config.request_interval, DEFAULT_REQUEST_INTERVAL);
        assert!(!config.user_agent.is_empty());
    }

    #[test]
    fn test_filing_index_url() {
        let config = EdgarConfig::default();
        let cik = Cik::from_number(320193);
        assert_eq!(
            config.filing_index_url(&cik, "0000320193-24-000123"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/0000320193-24-000123-index.html"
        );
    }

    #[test]
    fn test_with_base_url() {
        let config = EdgarConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(
            config.submissions_url("0000320193"),
            "http://localhost:8080/submissions/CIK0000320193.json"
        );
        assert_eq!(
            config.tickers_url,
            "http://localhost:8080/files/company_tickers.json"
        );
    }
}
