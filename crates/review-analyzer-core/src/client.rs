//! HTTP client for the IMDb catalog
//!
//! Sends browser-like requests and returns raw HTML. There is no retry:
//! a timeout or a non-success status is reported straight to the caller.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS};
use tracing::debug;

use crate::error::{AnalyzerError, Result};
use crate::url::BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Configuration for the catalog HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog origin, without trailing slash (default: https://www.imdb.com)
    pub base_url: String,
    /// Timeout for search and review pages in seconds (default: 10)
    pub timeout_secs: u64,
    /// Timeout for the secondary poster lookup in seconds (default: 5)
    pub poster_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 10,
            poster_timeout_secs: 5,
        }
    }
}

/// HTTP client wrapper for catalog pages
///
/// Handles all HTTP communication with the catalog, including:
/// - Browser-mimicking headers (User-Agent, Accept, Accept-Language)
/// - Per-request timeouts
/// - Mapping of non-success statuses and timeouts to [`AnalyzerError`]
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    poster_timeout: Duration,
}

impl CatalogClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers(default_headers())
            .build()
            .map_err(AnalyzerError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poster_timeout: Duration::from_secs(config.poster_timeout_secs),
        })
    }

    /// Catalog origin this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout used for secondary poster lookups
    pub fn poster_timeout(&self) -> Duration {
        self.poster_timeout
    }

    /// Fetch HTML content from a path on the catalog
    ///
    /// # Arguments
    /// * `path` - The path to fetch (e.g., "/title/tt1375666/reviews/")
    ///
    /// # Errors
    /// - `Timeout` - The request exceeded the configured timeout
    /// - `CatalogStatus` - Server answered with a non-success status
    /// - `HttpError` - Any other network failure
    pub async fn fetch(&self, path: &str) -> Result<String> {
        self.send(path, None).await
    }

    /// Fetch HTML content with a request-specific timeout
    pub async fn fetch_with_timeout(&self, path: &str, timeout: Duration) -> Result<String> {
        self.send(path, Some(timeout)).await
    }

    async fn send(&self, path: &str, timeout: Option<Duration>) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching catalog page");

        let mut request = self.client.get(&url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalyzerError::from_transport(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "catalog returned non-success status");
            return Err(AnalyzerError::CatalogStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| AnalyzerError::from_transport(e, &url))
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}
