//! Aggregation of sold listings into per-title and overall price statistics.

use crate::ebay::{ListingRecord, ListingSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Listings from every region with duplicates removed, in fetch order.
pub type CombinedResult = Vec<ListingRecord>;

/// Price statistics for one exact title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub title: String,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Price statistics across every combined listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStat {
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregated listings and statistics for a non-empty search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldSummary {
    pub listings: CombinedResult,
    /// One row per distinct title, ordered by title
    pub categories: Vec<CategoryStat>,
    pub overall: OverallStat,
}

/// Outcome of aggregating one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PriceReport {
    /// No listings survived combining and deduplication.
    NoResults,
    Found(SoldSummary),
}

impl PriceReport {
    /// Returns the summary, if any listings were found.
    pub fn summary(&self) -> Option<&SoldSummary> {
        match self {
            PriceReport::NoResults => None,
            PriceReport::Found(summary) => Some(summary),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PriceReport::NoResults)
    }
}

/// Combines listing sets, drops duplicates and computes price statistics.
///
/// Records are duplicates when title, price and date all match; the first
/// occurrence is kept. Titles are grouped exactly as scraped.
pub fn aggregate<I>(sets: I) -> PriceReport
where
    I: IntoIterator<Item = ListingSet>,
{
    let listings = combine(sets);

    let Some(overall) = overall_stat(&listings) else {
        debug!("No listings to aggregate");
        return PriceReport::NoResults;
    };

    let categories = category_stats(&listings);
    debug!("Aggregated {} listings into {} titles", listings.len(), categories.len());

    PriceReport::Found(SoldSummary { listings, categories, overall })
}

/// Concatenates sets in order and removes (title, price, date) duplicates.
pub fn combine<I>(sets: I) -> CombinedResult
where
    I: IntoIterator<Item = ListingSet>,
{
    let mut seen: HashSet<(String, u64, String)> = HashSet::new();

    sets.into_iter()
        .flatten()
        .filter(|r| seen.insert((r.title.clone(), r.price.to_bits(), r.date.clone())))
        .collect()
}

fn category_stats(listings: &[ListingRecord]) -> Vec<CategoryStat> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in listings {
        groups.entry(record.title.as_str()).or_default().push(record.price);
    }

    groups
        .into_iter()
        .map(|(title, prices)| CategoryStat {
            title: title.to_string(),
            count: prices.len(),
            mean: mean(&prices),
            min: prices.iter().copied().fold(f64::INFINITY, f64::min),
            max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
        .collect()
}

fn overall_stat(listings: &[ListingRecord]) -> Option<OverallStat> {
    let mut prices: Vec<f64> = listings.iter().map(|r| r.price).collect();
    if prices.is_empty() {
        return None;
    }

    prices.sort_by(f64::total_cmp);

    Some(OverallStat {
        median: median_of_sorted(&prices),
        mean: mean(&prices),
        min: prices[0],
        max: prices[prices.len() - 1],
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value, or the average of the two middle values for an even count.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Formats a price for display: `$` and exactly two decimals.
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}
