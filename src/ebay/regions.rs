//! eBay regional domains queried for sold listings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Marketplace domains searched for sold listings.
///
/// `Ca` is the primary (country) site and `Com` the secondary (global) site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Ca,
    Com,
}

impl Region {
    /// Returns the eBay domain for this region.
    pub fn domain(&self) -> &'static str {
        match self {
            Region::Ca => "ebay.ca",
            Region::Com => "ebay.com",
        }
    }

    /// Returns the base URL for this region.
    pub fn base_url(&self) -> String {
        format!("https://www.{}", self.domain())
    }

    /// Returns the currency code prices are usually displayed in.
    pub fn currency(&self) -> &'static str {
        match self {
            Region::Ca => "CAD",
            Region::Com => "USD",
        }
    }

    /// Returns the Accept-Language header value for this region.
    pub fn accept_language(&self) -> &'static str {
        match self {
            Region::Ca => "en-CA,en;q=0.9,fr-CA;q=0.8",
            Region::Com => "en-US,en;q=0.9",
        }
    }

    /// Whether this is the primary or secondary marketplace.
    pub fn role(&self) -> &'static str {
        match self {
            Region::Ca => "primary",
            Region::Com => "secondary",
        }
    }

    /// Returns all supported regions, primary first.
    pub fn all() -> &'static [Region] {
        &[Region::Ca, Region::Com]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Region::Ca => "ca",
            Region::Com => "com",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ca" | "canada" | "ebay.ca" | "primary" => Ok(Region::Ca),
            "com" | "us" | "global" | "ebay.com" | "secondary" => Ok(Region::Com),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unknown region '{0}'. Valid regions: ca, com")]
pub struct RegionParseError(String);
