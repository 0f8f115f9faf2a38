//! CSS selectors for eBay search result pages.
//!
//! eBay serves two generations of result markup: the newer `s-card` layout and
//! the older `s-item` layout. Each field lists its candidates newest first;
//! the first candidate that matches inside a card wins.
//!
//! **Update process**: When parsing fails, capture an HTML sample,
//! add the new selector at the front of the list, and add a test fixture.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

fn compile(candidates: &[&str]) -> Vec<Selector> {
    candidates.iter().map(|c| Selector::parse(c).unwrap()).collect()
}

/// Returns the first element matched by the highest-priority candidate.
pub fn first_match<'a>(element: ElementRef<'a>, candidates: &[Selector]) -> Option<ElementRef<'a>> {
    candidates.iter().find_map(|selector| element.select(selector).next())
}

/// Selectors for sold-listing search results.
pub mod search {
    use super::*;

    /// Listing card container, both generations.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.s-card, li.s-item").unwrap());

    /// Listing title text.
    pub static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".s-card__title .su-styled-text",
            ".s-card__title",
            "div.s-item__title span[role='heading']",
            ".s-item__title",
        ])
    });

    /// Sold price text.
    pub static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[".s-card__price", "span.s-item__price", ".s-item__detail--primary .s-item__price"])
    });

    /// Link to the listing page.
    pub static LINK: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&["a.su-link[href]", "a.s-item__link[href]", "a[href*='/itm/']"])
    });

    /// Sold/ended date caption.
    pub static DATE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        compile(&[
            ".s-card__caption .su-styled-text",
            ".s-card__caption",
            ".s-item__caption--signal",
            ".s-item__title--tagblock .POSITIVE",
            "span.s-item__listingDate",
            ".s-item__ended-date",
        ])
    });
}

/// Selectors for detecting bot-challenge pages.
pub mod errors {
    use super::*;

    /// CAPTCHA or interruption form.
    pub static CHALLENGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='captcha'], \
             #captcha_loading, \
             iframe[src*='captcha']",
        )
        .unwrap()
    });

    /// Page title, checked for the interruption banner.
    pub static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
}
