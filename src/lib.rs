//! sold-tracker - Sold-listing price tracker for eBay.ca and eBay.com
//!
//! Scrapes the sold/completed search results of each marketplace region,
//! combines them, and reports per-title and overall price statistics.

pub mod commands;
pub mod config;
pub mod ebay;
pub mod format;
pub mod stats;

pub use config::Config;
pub use ebay::{fetch_listings, ListingRecord, ListingSet, Region};
pub use stats::{aggregate, CategoryStat, OverallStat, PriceReport, SoldSummary};
