//! Hand-off to an external maps application, and map tile sources.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::CoreError;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Travel mode hint passed to the maps application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" => Ok(TravelMode::Walking),
            "drive" | "driving" => Ok(TravelMode::Driving),
            _ => Err(CoreError::UnknownTravelMode(s.to_string())),
        }
    }
}

/// Builds a directions URL from `origin` (when known) to `destination`.
///
/// Without an origin the maps application falls back to the device's own
/// location.
#[must_use]
pub fn directions_url(
    origin: Option<Coordinate>,
    destination: Coordinate,
    mode: TravelMode,
) -> String {
    let mut url = String::from(DIRECTIONS_BASE_URL);
    if let Some(origin) = origin {
        url.push_str(&format!("&origin={origin}"));
    }
    url.push_str(&format!(
        "&destination={destination}&travelmode={}",
        mode.as_str()
    ));
    url
}

/// Base map imagery offered to the consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    #[default]
    Street,
    Satellite,
}

impl MapStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MapStyle::Street => "street",
            MapStyle::Satellite => "satellite",
        }
    }

    /// Slippy-map URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    #[must_use]
    pub fn tile_url_template(self) -> &'static str {
        match self {
            MapStyle::Street => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            MapStyle::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    #[must_use]
    pub fn attribution(self) -> &'static str {
        match self {
            MapStyle::Street => "© OpenStreetMap contributors",
            MapStyle::Satellite => "Tiles © Esri",
        }
    }

    /// The other style; backs the street/satellite toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            MapStyle::Street => MapStyle::Satellite,
            MapStyle::Satellite => MapStyle::Street,
        }
    }
}

impl FromStr for MapStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "street" | "standard" => Ok(MapStyle::Street),
            "satellite" => Ok(MapStyle::Satellite),
            _ => Err(CoreError::UnknownMapStyle(s.to_string())),
        }
    }
}
