//! Input records supplied by the surrounding application.
//!
//! These are plain data: the engine borrows them for a render pass and never
//! mutates them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::placement::ImageInfo;

/// The kind of announcement a post makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    /// A new listing.
    JustListed,
    /// A closed sale.
    JustSold,
    /// A signed lease.
    JustRented,
    /// An open house event.
    OpenHouse,
    /// An accepted offer.
    UnderContract,
    /// A listing returning to market.
    BackOnMarket,
}

impl PostType {
    /// Every post type, in menu order.
    pub const ALL: [PostType; 6] = [
        PostType::JustListed,
        PostType::JustSold,
        PostType::JustRented,
        PostType::OpenHouse,
        PostType::UnderContract,
        PostType::BackOnMarket,
    ];

    /// Heading used when the style carries no custom heading.
    #[must_use]
    pub const fn default_heading(self) -> &'static str {
        match self {
            Self::JustListed => "Just Listed",
            Self::JustSold => "Just Sold",
            Self::JustRented => "Just Rented",
            Self::OpenHouse => "Open House",
            Self::UnderContract => "Under Contract",
            Self::BackOnMarket => "Back on Market",
        }
    }

    /// Wire name, e.g. `JUST_LISTED`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JustListed => "JUST_LISTED",
            Self::JustSold => "JUST_SOLD",
            Self::JustRented => "JUST_RENTED",
            Self::OpenHouse => "OPEN_HOUSE",
            Self::UnderContract => "UNDER_CONTRACT",
            Self::BackOnMarket => "BACK_ON_MARKET",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = String;

    /// Accepts `JUST_LISTED`, `just_listed` and `just-listed`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|post_type| post_type.as_str() == normalized)
            .ok_or_else(|| format!("unknown post type: {s}"))
    }
}

/// Unit of a floor area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    /// Square feet.
    #[default]
    Sqft,
    /// Square meters.
    M2,
}

impl AreaUnit {
    /// Suffix shown after the number.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Sqft => "sqft",
            Self::M2 => "m2",
        }
    }
}

/// A unit-tagged floor area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Numeric area.
    pub value: f64,
    /// Unit of `value`.
    #[serde(default)]
    pub unit: AreaUnit,
}

/// Stored areas arrive either as a bare number of square feet or unit-tagged.
#[derive(Deserialize)]
#[serde(untagged)]
enum AreaInput {
    Plain(f64),
    Tagged(Area),
}

fn area_from_input<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Area>, D::Error> {
    Ok(Option::<AreaInput>::deserialize(deserializer)?.map(|input| match input {
        AreaInput::Plain(value) => Area {
            value,
            unit: AreaUnit::Sqft,
        },
        AreaInput::Tagged(area) => area,
    }))
}

/// Counts may be sent as integral floats (`3.0`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn count_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let Some(value) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if value.trunc() == value && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(Some(value as u32))
    } else {
        Err(D::Error::custom(format!("expected a whole non-negative count, got {value}")))
    }
}

/// Property data as fetched for a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Street line, e.g. `123 Main St`.
    pub address_line: String,
    /// City name.
    pub city: String,
    /// State, province or region.
    #[serde(default)]
    pub state_or_region: String,
    /// Postal or ZIP code.
    #[serde(default)]
    pub postal_code: String,
    /// Country name.
    #[serde(default)]
    pub country: String,
    /// Bedroom count.
    #[serde(default, deserialize_with = "count_from_number")]
    pub beds: Option<u32>,
    /// Bathroom count; halves are allowed.
    #[serde(default)]
    pub baths: Option<f64>,
    /// Floor area: a bare number (square feet) or `{ "value", "unit" }`.
    #[serde(default, alias = "squareFeet", deserialize_with = "area_from_input")]
    pub area: Option<Area>,
    /// Preformatted price, e.g. `$450,000`.
    #[serde(default)]
    pub price: Option<String>,
    /// Background photograph.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl PropertyRecord {
    /// Check the fetched-record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidProperty`] if the street line or city is
    /// empty.
    pub fn validate(&self) -> EngineResult<()> {
        if self.address_line.trim().is_empty() {
            return Err(EngineError::InvalidProperty("addressLine is empty".into()));
        }
        if self.city.trim().is_empty() {
            return Err(EngineError::InvalidProperty("city is empty".into()));
        }
        Ok(())
    }
}

/// Reference to a user-supplied image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Source location understood by the rendering surface.
    pub url: String,
}

impl ImageRef {
    /// Create a reference.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Branding owned by the user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Brokerage logo.
    #[serde(default)]
    pub brokerage_logo: Option<ImageRef>,
    /// Realtor headshot.
    #[serde(default)]
    pub realtor_picture: Option<ImageRef>,
    /// Name written as the signature mark.
    #[serde(default)]
    pub agent_name: Option<String>,
}

/// Decoded images available to a render pass.
///
/// A URL the catalog cannot resolve is a missing asset: its layer is dropped
/// and the rest of the template still renders.
pub trait AssetCatalog {
    /// Intrinsic size of the decoded image at `url`, if it decoded.
    fn lookup(&self, url: &str) -> Option<ImageInfo>;
}

impl AssetCatalog for HashMap<String, ImageInfo> {
    fn lookup(&self, url: &str) -> Option<ImageInfo> {
        self.get(url).copied()
    }
}

/// A catalog that has nothing decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn lookup(&self, _url: &str) -> Option<ImageInfo> {
        None
    }
}
