//! HTTP client for eBay requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::ebay::regions::Region;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching sold-listing search pages - enables mocking for tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the sold/completed search results page for a query.
    async fn search_sold(&self, query: &str, region: Region) -> Result<String>;

    /// Site root that relative listing links on fetched pages resolve against.
    fn site_url(&self, region: Region) -> String {
        region.base_url()
    }
}

/// eBay HTTP client with browser impersonation.
pub struct EbayClient {
    client: Client,
    user_agent: Option<String>,
    base_url: Option<String>,
}

impl EbayClient {
    /// Creates a new eBay client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new eBay client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        if config.timeout_secs == 0 {
            anyhow::bail!("Request timeout must be at least 1 second");
        }

        let timeout = Duration::from_secs(config.timeout_secs);

        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(timeout);

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, user_agent: config.user_agent.clone(), base_url })
    }

    /// Returns the base URL (custom for testing, or region-based for production).
    fn base_url(&self, region: Region) -> String {
        self.base_url.clone().unwrap_or_else(|| region.base_url())
    }

    /// Builds the sold/completed search URL for a query.
    pub fn search_url(&self, query: &str, region: Region) -> String {
        format!(
            "{}/sch/i.html?_nkw={}&_sacat=0&LH_Sold=1&LH_Complete=1",
            self.base_url(region),
            encode_query(query)
        )
    }

    /// Performs a single GET request; no retries.
    async fn get(&self, url: &str, region: Region) -> Result<String> {
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", region.accept_language())
            .header("Cache-Control", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1");

        if let Some(user_agent) = &self.user_agent {
            request = request.header("User-Agent", user_agent.as_str());
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl ListingSource for EbayClient {
    async fn search_sold(&self, query: &str, region: Region) -> Result<String> {
        let url = self.search_url(query, region);

        info!("Searching {} for sold listings: {}", region.domain(), query);
        self.get(&url, region).await
    }

    fn site_url(&self, region: Region) -> String {
        self.base_url(region)
    }
}

/// Percent-encodes each word of the query and joins the words with `+`.
fn encode_query(query: &str) -> String {
    query.split_whitespace().map(urlencoding::encode).collect::<Vec<_>>().join("+")
}
