//! Domain types and pure operations for the nearby-resource locator.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod geo;
pub mod hours;
pub mod navigation;
pub mod poi;
pub mod rank;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{filter_points, format_distance};
pub use geo::{distance_meters, Coordinate, EARTH_RADIUS_M};
pub use hours::{derive_status, derive_status_now};
pub use navigation::{directions_url, MapStyle, TravelMode};
pub use poi::{Category, OpenStatus, PointOfInterest};
pub use rank::{rank, truncate_ranking, RankedResult, Ranking};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown travel mode: {0}")]
    UnknownTravelMode(String),

    #[error("unknown map style: {0}")]
    UnknownMapStyle(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
