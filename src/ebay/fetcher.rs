//! Best-effort fetch of one region's sold listings.

use crate::ebay::client::ListingSource;
use crate::ebay::models::ListingSet;
use crate::ebay::parser::Parser;
use crate::ebay::regions::Region;
use tracing::{debug, warn};

/// Fetches and parses sold listings for `search_term` from one region.
///
/// Makes exactly one request. Transport errors, timeouts and non-success
/// statuses yield an empty set, the same as a search with no matches.
/// Relative links resolve against the source's site URL for the region.
pub async fn fetch_listings(
    source: &impl ListingSource,
    search_term: &str,
    region: Region,
) -> ListingSet {
    let html = match source.search_sold(search_term, region).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Fetch from {} failed, continuing without it: {:#}", region.domain(), e);
            return ListingSet::empty();
        }
    };

    let listings = Parser::with_base_url(source.site_url(region)).parse_listings(&html);
    debug!("{} returned {} sold listings", region.domain(), listings.len());

    listings
}
