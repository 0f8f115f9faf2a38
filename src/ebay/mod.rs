//! eBay-specific modules for fetching and parsing sold listings.

pub mod client;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;

pub use client::{EbayClient, ListingSource};
pub use fetcher::fetch_listings;
pub use models::{ListingRecord, ListingSet, DATE_UNAVAILABLE};
pub use parser::{parse_price, Parser};
pub use regions::Region;
