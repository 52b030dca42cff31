//! Ticker to CIK resolution.

use serde::Deserialize;
use statements_core::{Cik, Result, Ticker};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::client::EdgarClient;

/// Company ticker information from the SEC registry.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct CompanyTickerInfo {
    cik_str: u64,
    ticker: String,
    title: String,
}

/// The only field of a submissions document the resolver reads.
#[derive(Debug, Deserialize)]
struct SubmissionsIdentity {
    cik: CikField,
}

/// The submissions API serves `cik` as a string, older mirrors as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CikField {
    Text(String),
    Number(u64),
}

impl CikField {
    fn into_cik(self) -> Option<Cik> {
        match self {
            Self::Text(s) => Cik::parse(&s),
            Self::Number(n) => Some(Cik::from_number(n)),
        }
    }
}

impl EdgarClient {
    /// Resolves a ticker symbol to the registrant's CIK.
    ///
    /// The submissions endpoint is tried first with the ticker itself as the
    /// identifier. Any non-2xx answer falls back to a case-insensitive scan of
    /// the company ticker registry.
    ///
    /// Returns `Ok(None)` when neither source knows the ticker, and for an
    /// empty ticker (no request is made).
    ///
    /// # Errors
    /// Returns an error if a request fails or a 2xx body cannot be decoded.
    #[instrument(skip(self))]
    pub async fn resolve_cik(&self, ticker: &str) -> Result<Option<Cik>> {
        let ticker = Ticker::new(ticker);
        if ticker.is_empty() {
            return Ok(None);
        }

        let guess = format!("{:0>10}", ticker.as_str());
        let url = self.config().submissions_url(&guess);
        let response = self.fetch(&url).await?;

        if response.is_success() {
            let identity: SubmissionsIdentity = response.json()?;
            let cik = identity.cik.into_cik();
            debug!(?cik, "Resolved CIK from submissions endpoint");
            return Ok(cik);
        }

        debug!(
            status = response.status,
            "Submissions lookup missed, scanning ticker registry"
        );
        self.lookup_registry(&ticker).await
    }

    /// Scans the ticker registry for an exact, case-insensitive match.
    async fn lookup_registry(&self, ticker: &Ticker) -> Result<Option<Cik>> {
        let url = &self.config().tickers_url;
        let response = self.fetch_ok(url).await?;
        let data: HashMap<String, CompanyTickerInfo> = response.json()?;

        let found = data
            .into_values()
            .find(|company| company.ticker.eq_ignore_ascii_case(ticker.as_str()))
            .map(|company| Cik::from_number(company.cik_str));

        match &found {
            Some(cik) => debug!("Found CIK {} for ticker {}", cik.as_str(), ticker.as_str()),
            None => debug!("Ticker {} not in registry", ticker.as_str()),
        }
        Ok(found)
    }
}
