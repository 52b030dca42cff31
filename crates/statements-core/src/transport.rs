//! HTTP transport seam.
//!
//! Every stage reaches the network through [`HttpTransport`]. The production
//! implementation lives in `statements-edgar`; [`StaticTransport`] serves canned
//! responses so stages can be exercised without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use tracing::trace;

use crate::error::{DataError, Result};

/// A fully-read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Creates an empty `404 Not Found` response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(404, "")
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Turns a non-2xx response into [`DataError::Http`].
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DataError::Http {
                url: url.to_string(),
                status: self.status,
            })
        }
    }

    /// Deserializes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| DataError::Parse(e.to_string()))
    }
}

/// Performs GET requests on behalf of the pipeline stages.
///
/// Implementations must attach whatever identifying headers the upstream
/// provider requires. A non-2xx status is returned as a normal response; only
/// failures to obtain a response at all are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Fetches `url` and reads the whole body.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Transport that answers from a fixed URL → response table.
///
/// Unknown URLs answer `404`. Every requested URL is recorded so tests can
/// assert on the request sequence.
#[derive(Debug, Default)]
pub struct StaticTransport {
    routes: HashMap<String, HttpResponse>,
    requests: RwLock<Vec<String>>,
}

impl StaticTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for `url`.
    #[must_use]
    pub fn with_route(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    /// Registers a `200 OK` response for `url`.
    #[must_use]
    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_route(url, HttpResponse::ok(body))
    }

    /// Returns the URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for StaticTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(url.to_string());
        }
        let response = self
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(HttpResponse::not_found);
        trace!(url, status = response.status, "StaticTransport: answered");
        Ok(response)
    }
}
