//! Primary XBRL document lookup on a filing index page.

use reqwest::Url;
use scraper::{Html, Selector};
use statements_core::{DataError, DocumentReference, Result, is_primary_xbrl_path};
use tracing::{debug, instrument};

use crate::client::EdgarClient;

/// Returns the first link on `html` that names a primary XBRL instance,
/// resolved against `base`.
fn find_primary_document(html: &str, base: &Url) -> Result<Option<DocumentReference>> {
    let document = Html::parse_document(html);
    let links = Selector::parse("a[href]")
        .map_err(|_| DataError::Parse("Invalid link selector".to_string()))?;

    for link in document.select(&links) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href.trim()) else {
            continue;
        };
        if !is_primary_xbrl_path(url.path()) {
            continue;
        }
        if let Some(reference) = DocumentReference::new(url.to_string()) {
            return Ok(Some(reference));
        }
    }
    Ok(None)
}

impl EdgarClient {
    /// Finds the primary XBRL document listed on a filing index page.
    ///
    /// Links are scanned in document order and the first `.xml` link that is
    /// not a calculation, label, presentation or definition linkbase wins.
    /// Returns `Ok(None)` if the page lists no such document.
    ///
    /// # Errors
    /// Returns an error if `index_url` is not an absolute URL, or the page
    /// cannot be fetched.
    #[instrument(skip(self))]
    pub async fn primary_document(&self, index_url: &str) -> Result<Option<DocumentReference>> {
        let base = Url::parse(index_url)
            .map_err(|e| DataError::InvalidParameter(format!("Invalid index URL {}: {}", index_url, e)))?;

        let response = self.fetch_ok(index_url).await?;
        let found = find_primary_document(&response.body, &base)?;

        match &found {
            Some(document) => debug!("Found primary XBRL document {}", document),
            None => debug!("No primary XBRL document on index page"),
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgarConfig;
    use statements_core::StaticTransport;
    use std::sync::Arc;

    const INDEX_URL: &str =
        "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/0000320193-24-000123-index.html";

    fn index_page(links: &[&str]) -> String {
        let rows: String = links
            .iter()
            .map(|href| format!("<tr><td><a href=\"{href}\">{href}</a></td></tr>"))
            .collect();
        format!("<html><body><table class=\"tableFile\">{rows}</table></body></html>")
    }

    fn base() -> Url {
        Url::parse(INDEX_URL).unwrap()
    }

    #[test]
    fn test_skips_linkbases() {
        let html = index_page(&[
            "/ix?doc=/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_cal.xml",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_def.xml",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_htm.xml",
            "/Archives/edgar/data/320193/000032019324000123/other.xml",
        ]);
        let found = find_primary_document(&html, &base()).unwrap().unwrap();
        assert_eq!(
            found.as_str(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-20240928_htm.xml"
        );
    }

    #[test]
    fn test_relative_href() {
        let html = index_page(&["aapl-20240928_htm.xml"]);
        let found = find_primary_document(&html, &base()).unwrap().unwrap();
        assert_eq!(
            found.as_str(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000123/aapl-20240928_htm.xml"
        );
    }

    #[test]
    fn test_linkbase_only_index() {
        let html = index_page(&[
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_cal.xml",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_lab.xml",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928_pre.xml",
            "/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm",
        ]);
        assert!(find_primary_document(&html, &base()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_primary_document_fetches_index() {
        let transport = Arc::new(StaticTransport::new().with_body(
            INDEX_URL,
            index_page(&["/Archives/edgar/data/320193/000032019324000123/aapl-20240928_htm.xml"]),
        ));
        let client = EdgarClient::with_transport(transport.clone(), EdgarConfig::default());

        let found = client.primary_document(INDEX_URL).await.unwrap();
        assert!(found.is_some());
        assert_eq!(transport.requests(), vec![INDEX_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_index_url() {
        let client = EdgarClient::with_transport(
            Arc::new(StaticTransport::new()),
            EdgarConfig::default(),
        );
        let err = client.primary_document("not a url").await.unwrap_err();
        assert!(matches!(err, DataError::InvalidParameter(_)));
    }
}
