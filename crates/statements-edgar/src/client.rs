//! EDGAR HTTP client with rate limiting.

use async_trait::async_trait;
use statements_core::{DataError, HttpResponse, HttpTransport, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config::EdgarConfig;

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// [`HttpTransport`] backed by `reqwest`.
///
/// Sends the configured user agent with every request and spaces requests
/// by the configured interval. Requests are never retried.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ReqwestTransport {
    /// Builds a transport from `config`.
    ///
    /// # Errors
    /// Returns [`DataError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &EdgarConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.request_interval))
    }

    /// Wraps a pre-configured reqwest client.
    ///
    /// The client is expected to carry its own identifying user agent.
    ///
    /// # Example
    /// ```
    /// use statements_edgar::ReqwestTransport;
    /// use std::time::Duration;
    ///
    /// let client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .user_agent("MyApp/1.0 (contact@example.com)")
    ///     .build()
    ///     .unwrap();
    ///
    /// let transport = ReqwestTransport::with_client(client, Duration::from_millis(200));
    /// ```
    pub fn with_client(client: reqwest::Client, min_interval: Duration) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        // Rate limit
        self.rate_limiter.lock().await.wait().await;

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DataError::Network(format!("Failed to read body of {}: {}", url, e)))?;

        debug!(status, bytes = body.len(), "Received response from {}", url);
        Ok(HttpResponse { status, body })
    }
}

/// SEC EDGAR client.
///
/// Holds the configuration and the transport shared by every pipeline stage:
/// [`resolve_cik`](Self::resolve_cik), [`latest_annual_filing`](Self::latest_annual_filing),
/// [`primary_document`](Self::primary_document) and
/// [`extract_statements`](Self::extract_statements).
#[derive(Debug, Clone)]
pub struct EdgarClient {
    transport: Arc<dyn HttpTransport>,
    config: EdgarConfig,
}

impl EdgarClient {
    /// Create a client that talks to the network with `reqwest`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    ///
    /// # Example
    /// ```
    /// use statements_edgar::{EdgarClient, EdgarConfig};
    ///
    /// let client = EdgarClient::new(EdgarConfig::new("MyApp/1.0 (contact@example.com)")).unwrap();
    /// ```
    pub fn new(config: EdgarConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: EdgarConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Fetches `url` without interpreting the status.
    pub(crate) async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        self.transport.get(url).await
    }

    /// Fetches `url`, treating any non-2xx status as an error.
    pub(crate) async fn fetch_ok(&self, url: &str) -> Result<HttpResponse> {
        self.fetch(url).await?.error_for_status(url)
    }
}
