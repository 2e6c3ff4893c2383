//! Points of interest and their categories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::CoreError;

/// The fixed set of resource kinds the locator searches for.
///
/// Variant order is the display order used by rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hospital,
    Police,
    Pharmacy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Hospital, Category::Police, Category::Pharmacy];

    /// The OpenStreetMap `amenity` tag value for this category.
    #[must_use]
    pub fn amenity(self) -> &'static str {
        match self {
            Category::Hospital => "hospital",
            Category::Police => "police",
            Category::Pharmacy => "pharmacy",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Hospital => "Hospital",
            Category::Police => "Police Station",
            Category::Pharmacy => "Medical Store",
        }
    }

    /// Maps an OSM `amenity` value back to a category.
    #[must_use]
    pub fn from_amenity(amenity: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.amenity() == amenity)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.amenity())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts either the tag value (`police`) or the label
    /// (`Police Station`), ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.amenity().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Whether a point of interest is open at the evaluated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

impl OpenStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OpenStatus::Open => "Open now",
            OpenStatus::Closed => "Closed now",
            OpenStatus::Unknown => "Status unknown",
        }
    }
}

/// A named, geolocated resource returned by the geodata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Provider-assigned identifier, e.g. `node/240109189`.
    pub id: String,
    pub name: String,
    pub category: Category,
    pub coordinate: Coordinate,
    /// Raw `opening_hours` tag, if the provider had one.
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    /// Distance from the query origin in meters.
    pub distance_m: f64,
    pub status: OpenStatus,
}
