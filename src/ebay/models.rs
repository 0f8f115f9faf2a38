//! Data models for scraped sold listings.

use serde::{Deserialize, Serialize};

/// Date shown when a listing card carries no sold/ended date.
pub const DATE_UNAVAILABLE: &str = "N/A";

/// One sold listing scraped from a search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing title as displayed
    pub title: String,
    /// Sold price in the page's displayed currency unit
    pub price: f64,
    /// Absolute URL to the listing
    pub link: String,
    /// Sold/ended date as displayed, or [`DATE_UNAVAILABLE`]
    pub date: String,
}

impl ListingRecord {
    /// Creates a record; a missing date becomes [`DATE_UNAVAILABLE`].
    pub fn new(
        title: impl Into<String>,
        price: f64,
        link: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            link: link.into(),
            date: date.unwrap_or_else(|| DATE_UNAVAILABLE.to_string()),
        }
    }

    /// Returns true if the page provided a sold date.
    pub fn has_date(&self) -> bool {
        self.date != DATE_UNAVAILABLE
    }
}

/// Listings produced by one fetch, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingSet {
    pub listings: Vec<ListingRecord>,
}

impl ListingSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if no listings were found.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.listings.iter()
    }
}

impl From<Vec<ListingRecord>> for ListingSet {
    fn from(listings: Vec<ListingRecord>) -> Self {
        Self { listings }
    }
}

impl IntoIterator for ListingSet {
    type Item = ListingRecord;
    type IntoIter = std::vec::IntoIter<ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}
