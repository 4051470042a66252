//! Search backends: the seam between the engine and the target endpoint.
//!
//! The engine only ever talks to a [`SearchBackend`]. [`HttpCollector`] is
//! the real implementation; `testing::MockSearchBackend` scripts responses
//! for unit tests.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::types::SearchHit;

/// Path suffix stripped from the target to obtain the connectivity-probe URL.
const SEARCH_PATH: &str = "/search";

/// Hits returned for one query, with the measured request latency.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,

    /// Request round-trip, excluding any pacing delay.
    pub elapsed: Duration,
}

impl SearchResponse {
    pub fn new(hits: Vec<SearchHit>, elapsed: Duration) -> Self {
        Self { hits, elapsed }
    }
}

/// A searchable target.
///
/// # Implementations
///
/// - `HttpCollector` - `GET {target}?q=...` over HTTP
/// - `MockSearchBackend` - scripted responses for tests
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one query.
    ///
    /// Transport failures and non-2xx statuses are reported as
    /// [`ProbeError::is_transport`] errors; a 2xx with an unreadable body is
    /// [`ProbeError::Decode`].
    async fn search(&self, query: &str) -> Result<SearchResponse>;

    /// Connectivity probe, run once before any query.
    async fn check_connection(&self) -> Result<()>;

    /// Human-readable target description for logs.
    fn name(&self) -> &str;
}

/// HTTP search backend.
///
/// Requests are issued one at a time by the caller; after every 2xx the
/// collector sleeps for the configured pacing delay before returning.
///
/// ```rust,ignore
/// let collector = HttpCollector::new("http://localhost:8000/search")?.with_pacing(Duration::ZERO);
/// let response = collector.search("python").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpCollector {
    client: reqwest::Client,
    target: Url,
    user_agent: String,
    pacing: Duration,
}

impl HttpCollector {
    /// Create a collector for `target` with default pacing and no timeout.
    pub fn new(target: &str) -> Result<Self> {
        Self::from_config(&ProbeConfig::default().with_target(target))
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let target = Url::parse(&config.target).map_err(|_| ProbeError::InvalidUrl {
            url: config.target.clone(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ProbeError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            target,
            user_agent: config.user_agent.clone(),
            pacing: config.pacing(),
        })
    }

    /// Set the delay applied after each successful request.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Target with a trailing `/search` path segment removed, and without
    /// query or fragment.
    pub fn base_url(&self) -> String {
        let mut base = self.target.clone();
        base.set_query(None);
        base.set_fragment(None);

        let path = self.target.path().trim_end_matches('/');
        if let Some(parent) = path.strip_suffix(SEARCH_PATH) {
            base.set_path(parent);
        }

        base.as_str().trim_end_matches('/').to_string()
    }
}

#[async_trait]
impl SearchBackend for HttpCollector {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!(query = %query, target = %self.target, "Search request starting");
        let started = Instant::now();

        let response = self
            .client
            .get(self.target.clone())
            .query(&[("q", query)])
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(query = %query, error = %e, "Search request failed");
                ProbeError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::Http(Box::new(e)))?;
        let elapsed = started.elapsed();

        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        let hits: Vec<SearchHit> = serde_json::from_str(&body)?;
        debug!(
            query = %query,
            count = hits.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Search request complete"
        );

        Ok(SearchResponse::new(hits, elapsed))
    }

    async fn check_connection(&self) -> Result<()> {
        let base = self.base_url();

        let response = self
            .client
            .get(&base)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| unreachable_error(&base, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable_error(
                &base,
                std::io::Error::new(std::io::ErrorKind::Other, format!("HTTP {}", status)),
            ));
        }

        info!(url = %base, "Server connection test successful");
        Ok(())
    }

    fn name(&self) -> &str {
        self.target.as_str()
    }
}

fn unreachable_error(
    url: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ProbeError {
    warn!(url = %url, error = %source, "Cannot connect to server");
    ProbeError::Unreachable {
        url: url.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_target() {
        let err = HttpCollector::new("not a url").unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl { .. }));
    }

    #[test]
    fn test_base_url_strips_search_path() {
        let collector = HttpCollector::new("http://localhost:8000/search").unwrap();
        assert_eq!(collector.base_url(), "http://localhost:8000");

        let nested = HttpCollector::new("http://example.com/api/search").unwrap();
        assert_eq!(nested.base_url(), "http://example.com/api");

        let plain = HttpCollector::new("http://example.com/find").unwrap();
        assert_eq!(plain.base_url(), "http://example.com/find");
    }

    #[test]
    fn test_base_url_ignores_search_in_host() {
        let collector = HttpCollector::new("http://search.internal/find").unwrap();
        assert_eq!(collector.base_url(), "http://search.internal/find");

        let trailing = HttpCollector::new("http://search.internal:8000/search/?x=1").unwrap();
        assert_eq!(trailing.base_url(), "http://search.internal:8000");

        let segment = HttpCollector::new("http://example.com/research").unwrap();
        assert_eq!(segment.base_url(), "http://example.com/research");
    }

    #[test]
    fn test_from_config_applies_pacing() {
        let config = ProbeConfig::default()
            .with_target("http://127.0.0.1:9/search")
            .with_pacing(5)
            .with_timeout(1);
        let collector = HttpCollector::from_config(&config).unwrap();
        assert_eq!(collector.pacing, Duration::from_millis(5));
        assert_eq!(collector.name(), "http://127.0.0.1:9/search");
    }

    #[test]
    fn test_new_uses_default_pacing() {
        let collector = HttpCollector::new("http://localhost:8000/search").unwrap();
        assert_eq!(collector.pacing, Duration::from_secs(1));
        assert_eq!(collector.target().port(), Some(8000));
    }

    #[tokio::test]
    async fn test_unreachable_target() {
        // Port 9 (discard) is not expected to have an HTTP listener.
        let collector = HttpCollector::new("http://127.0.0.1:9/search")
            .unwrap()
            .with_pacing(Duration::ZERO);

        let err = collector.check_connection().await.unwrap_err();
        assert!(matches!(err, ProbeError::Unreachable { .. }));

        let err = collector.search("python").await.unwrap_err();
        assert!(err.is_transport());
    }
}
