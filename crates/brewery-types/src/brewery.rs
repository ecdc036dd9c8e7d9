//! Brewery records as returned by the brewery directory.
//!
//! Only the fields the finder displays are modelled. Records are immutable
//! once fetched; a new search replaces them wholesale.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Brewery types that offer tours. Search results are narrowed to these.
pub const TOURING_BREWERY_TYPES: [BreweryType; 3] =
    [BreweryType::Micro, BreweryType::Brewpub, BreweryType::Regional];

/// Classification the directory assigns to every brewery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum BreweryType {
    /// Most craft breweries.
    Micro,
    /// An extremely small brewery, typically only distributing locally.
    Nano,
    /// A regional location of an expanded brewery.
    Regional,
    /// A beer-focused restaurant or restaurant/bar with a brewery on-premise.
    Brewpub,
    /// A very large brewery.
    Large,
    /// A brewery in planning or not yet opened to the public.
    Planning,
    /// A bar that does not brew on site.
    Bar,
    /// A contract brewery that uses someone else's equipment.
    Contract,
    /// Similar to contract brewing but the brewer holds the licence.
    Proprietor,
    /// A location that has been closed.
    Closed,
    /// A taproom without on-site brewing.
    Taproom,
    /// An additional location of a brewery.
    Location,
    /// Any type the directory introduces that this crate does not know.
    #[serde(other)]
    #[ts(skip)]
    Unknown,
}

impl BreweryType {
    /// Every type a user can filter by, in display order.
    pub const ALL: [Self; 12] = [
        Self::Micro,
        Self::Nano,
        Self::Regional,
        Self::Brewpub,
        Self::Large,
        Self::Planning,
        Self::Bar,
        Self::Contract,
        Self::Proprietor,
        Self::Closed,
        Self::Taproom,
        Self::Location,
    ];

    /// The name used on the wire and in the `by_type` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Nano => "nano",
            Self::Regional => "regional",
            Self::Brewpub => "brewpub",
            Self::Large => "large",
            Self::Planning => "planning",
            Self::Bar => "bar",
            Self::Contract => "contract",
            Self::Proprietor => "proprietor",
            Self::Closed => "closed",
            Self::Taproom => "taproom",
            Self::Location => "location",
            Self::Unknown => "unknown",
        }
    }

    /// Whether breweries of this type are kept in search results.
    pub fn offers_tours(self) -> bool {
        TOURING_BREWERY_TYPES.contains(&self)
    }
}

impl fmt::Display for BreweryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known brewery type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown brewery type: {0}")]
pub struct UnknownBreweryType(pub String);

impl FromStr for BreweryType {
    type Err = UnknownBreweryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBreweryType(wanted.to_owned()))
    }
}

/// A single brewery listing.
///
/// Field names match the directory's JSON. Street and website are `null`
/// for a fair share of real listings, so they are optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BreweryRecord {
    /// Display name.
    pub name: String,
    /// Directory classification.
    pub brewery_type: BreweryType,
    /// Street address line.
    pub street: Option<String>,
    /// City the brewery is in.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Public website.
    pub website_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touring_types_are_micro_brewpub_regional() {
        assert!(BreweryType::Micro.offers_tours());
        assert!(BreweryType::Brewpub.offers_tours());
        assert!(BreweryType::Regional.offers_tours());
        assert!(!BreweryType::Nano.offers_tours());
        assert!(!BreweryType::Closed.offers_tours());
        assert!(!BreweryType::Unknown.offers_tours());
    }

    #[test]
    fn parses_type_names_case_insensitively() {
        assert_eq!("micro".parse::<BreweryType>(), Ok(BreweryType::Micro));
        assert_eq!(" BrewPub ".parse::<BreweryType>(), Ok(BreweryType::Brewpub));
        assert_eq!(
            "speakeasy".parse::<BreweryType>(),
            Err(UnknownBreweryType("speakeasy".to_owned()))
        );
        // "unknown" is a fallback for the wire, not a filter choice.
        assert!("unknown".parse::<BreweryType>().is_err());
    }

    #[test]
    fn deserializes_directory_listing() {
        let json = serde_json::json!({
            "id": "5128df48-79fc-4f0f-8b52-d06be54d0cec",
            "name": "Land-Grant Brewing Company",
            "brewery_type": "micro",
            "street": "424 W Town St",
            "city": "Columbus",
            "state": "Ohio",
            "postal_code": "43215-4008",
            "phone": null,
            "website_url": "http://www.landgrantbrewing.com"
        });
        let record: Result<BreweryRecord, _> = serde_json::from_value(json);
        assert!(record.is_ok());
        let Ok(record) = record else { return };
        assert_eq!(record.brewery_type, BreweryType::Micro);
        assert_eq!(record.city, "Columbus");
        assert_eq!(record.phone, None);
        assert_eq!(
            record.website_url.as_deref(),
            Some("http://www.landgrantbrewing.com")
        );
    }

    #[test]
    fn unrecognised_type_falls_back_to_unknown() {
        let json = serde_json::json!({
            "name": "Mystery Works",
            "brewery_type": "cidery",
            "street": null,
            "city": "Akron",
            "postal_code": "44308",
            "website_url": null
        });
        let record: Result<BreweryRecord, _> = serde_json::from_value(json);
        assert_eq!(
            record.map(|r| r.brewery_type).ok(),
            Some(BreweryType::Unknown)
        );
    }
}
