//! Search command implementation.

use crate::config::Config;
use crate::ebay::{fetch_listings, EbayClient, ListingSource};
use crate::format::Formatter;
use crate::stats::{aggregate, PriceReport};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a sold-listing price search across the configured regions.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let client = EbayClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ListingSource,
        query: &str,
    ) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        let report = self.report_with_client(client, query).await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_report(&report, &self.config.regions))
    }

    /// Fetches every region one after the other and aggregates the results.
    pub async fn report_with_client(&self, client: &impl ListingSource, query: &str) -> PriceReport {
        info!("Searching sold listings for: {}", query);

        let mut sets = Vec::with_capacity(self.config.regions.len());
        for region in &self.config.regions {
            sets.push(fetch_listings(client, query, *region).await);
        }

        let report = aggregate(sets);
        match report.summary() {
            Some(summary) => info!("Found {} sold listings", summary.listings.len()),
            None => info!("No sold listings found for: {}", query),
        }

        report
    }
}
