//! HTTP client for catalog pages using plain GET requests.

use crate::catalog::error::FetchError;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("brick-scraper/", env!("CARGO_PKG_VERSION"));

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Fetches `url` (with pagination applied for `page > 1`) and returns the HTML body.
    async fn fetch(&self, url: &str, page: u32) -> Result<String, FetchError>;
}

/// Builds the request URL for a catalog page.
///
/// Page 1 is the bare URL; later pages append `?page=<n>&offset=0`.
pub fn page_url(url: &str, page: u32) -> String {
    if page <= 1 {
        url.to_string()
    } else {
        format!("{}?page={}&offset=0", url, page)
    }
}

/// HTTP client for the storefront.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = reqwest::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn fetch(&self, url: &str, page: u32) -> Result<String, FetchError> {
        let url = page_url(url, page);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.clone(), source })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status { url, status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request { url: url.clone(), source })?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody { url });
        }

        Ok(body)
    }
}
