//! HTML parser for eBay sold-listing search results.

use crate::ebay::models::{ListingRecord, ListingSet};
use crate::ebay::regions::Region;
use crate::ebay::selectors::{errors, first_match, search};
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};

/// Title substrings that mark promotional or separator cards.
const PLACEHOLDER_TITLES: &[&str] = &["Shop on eBay", "Results matching fewer words"];

/// Highlight prefix eBay puts in front of fresh listings' titles.
const NEW_LISTING_PREFIX: &str = "New Listing";

/// Screen-reader suffix appended to titles in the newer layout.
const NEW_WINDOW_SUFFIX: &str = "Opens in a new window or tab";

/// Symbols stripped from price text before parsing.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Parser for eBay search result pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a parser that resolves relative links against the region's site.
    pub fn new(region: Region) -> Self {
        Self::with_base_url(region.base_url())
    }

    /// Creates a parser with a custom base URL for link resolution.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Parses a search results page into listing records, in document order.
    ///
    /// Cards missing a title, price or link, placeholder cards and cards with
    /// an unparseable price are skipped.
    pub fn parse_listings(&self, html: &str) -> ListingSet {
        let document = Html::parse_document(html);

        if self.is_challenge_page(&document) {
            warn!("eBay served a bot challenge page; treating as no results");
            return ListingSet::empty();
        }

        let mut listings = Vec::new();
        let mut skipped = 0usize;

        for element in document.select(&search::RESULT) {
            match self.parse_card(element) {
                Some(record) => {
                    trace!("Parsed listing: {} - {:.2}", record.title, record.price);
                    listings.push(record);
                }
                None => skipped += 1,
            }
        }

        debug!("Parsed {} listings ({} cards skipped)", listings.len(), skipped);

        ListingSet::from(listings)
    }

    /// Parses a single listing card.
    fn parse_card(&self, element: ElementRef) -> Option<ListingRecord> {
        let raw_title = first_match(element, &search::TITLE).map(element_text)?;
        let price_text = first_match(element, &search::PRICE).map(element_text)?;
        let href = first_match(element, &search::LINK).and_then(|e| e.value().attr("href"))?;

        let Some(title) = clean_title(&raw_title) else {
            trace!("Skipping placeholder card: {:?}", raw_title);
            return None;
        };

        let Some(price) = parse_price(&price_text) else {
            trace!("Skipping '{}': unparseable price {:?}", title, price_text);
            return None;
        };

        let date = first_match(element, &search::DATE)
            .map(element_text)
            .filter(|d| !d.is_empty());

        Some(ListingRecord::new(title, price, self.absolute_link(href), date))
    }

    /// Resolves a listing href to an absolute URL.
    fn absolute_link(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if let Some(rest) = href.strip_prefix("//") {
            format!("https://{}", rest)
        } else if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            format!("{}/{}", self.base_url, href)
        }
    }

    /// Detects eBay's CAPTCHA / "Pardon Our Interruption" page.
    fn is_challenge_page(&self, document: &Html) -> bool {
        if document.select(&errors::CHALLENGE).next().is_some() {
            return true;
        }

        document
            .select(&errors::PAGE_TITLE)
            .next()
            .is_some_and(|t| t.text().collect::<String>().contains("Pardon Our Interruption"))
    }
}

/// Collects an element's text with whitespace runs collapsed.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a card title, returning `None` for placeholder cards.
///
/// The `New Listing` highlight is rendered inside the title element, so it is
/// stripped to keep a relisted item grouped under the same title as its sales.
fn clean_title(raw: &str) -> Option<String> {
    let title = raw.trim();

    if PLACEHOLDER_TITLES.iter().any(|p| title.contains(p)) {
        return None;
    }

    let title = title.strip_prefix(NEW_LISTING_PREFIX).unwrap_or(title);
    let title = title.strip_suffix(NEW_WINDOW_SUFFIX).unwrap_or(title).trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Parses a displayed price such as `"$1,234.50"` or `"C $12.00 to C $20.00"`.
///
/// Currency symbols, group separators and a leading currency code are removed;
/// the first remaining token must be a finite decimal number.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String =
        text.chars().filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',').collect();

    let cleaned = cleaned.trim_start().trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let token = cleaned.split_whitespace().next()?;

    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
