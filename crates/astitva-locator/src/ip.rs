//! One-shot IP geolocation used when the device position is unavailable or
//! disagrees with the network's idea of where we are.

use astitva_core::{distance_meters, Coordinate};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::LocatorError;
use crate::http::{build_client, get_json, parse_base_url};

pub const DEFAULT_IP_GEOLOCATION_URL: &str = "https://ipapi.co/json";

/// An IP fix replaces the current position only beyond this separation.
pub const IP_FALLBACK_THRESHOLD_M: f64 = 500.0;

/// Position reported by the IP geolocation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub coordinate: Coordinate,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// ipapi.co sends numbers, some compatible services send numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Number(v) => Some(*v),
            Degrees::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<Degrees>,
    longitude: Option<Degrees>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
}

/// Client for an ipapi.co-compatible JSON endpoint.
pub struct IpLocator {
    client: Client,
    url: Url,
}

impl IpLocator {
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LocatorError> {
        Self::with_url(DEFAULT_IP_GEOLOCATION_URL, timeout_secs, user_agent)
    }

    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`LocatorError::InvalidBaseUrl`] if `url` does not
    /// parse.
    pub fn with_url(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, LocatorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            url: parse_base_url(url)?,
        })
    }

    /// Looks up the caller's approximate position from its public IP.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Http`] on network failure.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx status.
    /// - [`LocatorError::Provider`] if the service answers `{"error": true}`.
    /// - [`LocatorError::Deserialize`] or [`LocatorError::Schema`] if the
    ///   coordinates are missing or invalid.
    pub async fn locate(&self) -> Result<IpLocation, LocatorError> {
        let body = get_json(&self.client, &self.url, "ip geolocation response").await?;

        if body.get("error").and_then(serde_json::Value::as_bool) == Some(true) {
            let reason = body
                .get("reason")
                .or_else(|| body.get("message"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(LocatorError::Provider(reason));
        }

        let parsed: IpApiResponse =
            serde_json::from_value(body).map_err(|e| LocatorError::Deserialize {
                context: "ip geolocation response".to_string(),
                source: e,
            })?;

        let schema_error = |reason: &str| LocatorError::Schema {
            context: "ip geolocation response".to_string(),
            reason: reason.to_string(),
        };
        let latitude = parsed
            .latitude
            .as_ref()
            .and_then(Degrees::value)
            .ok_or_else(|| schema_error("missing or non-numeric latitude"))?;
        let longitude = parsed
            .longitude
            .as_ref()
            .and_then(Degrees::value)
            .ok_or_else(|| schema_error("missing or non-numeric longitude"))?;
        let coordinate =
            Coordinate::new(latitude, longitude).map_err(|e| schema_error(&e.to_string()))?;

        tracing::debug!(%coordinate, city = ?parsed.city, "resolved ip geolocation");
        Ok(IpLocation {
            coordinate,
            city: parsed.city,
            region: parsed.region,
            country: parsed.country_name,
        })
    }
}

/// Whether an IP-derived position should replace `current`.
///
/// True when there is no current position, or when the two disagree by more
/// than [`IP_FALLBACK_THRESHOLD_M`].
#[must_use]
pub fn should_adopt_ip_fallback(current: Option<Coordinate>, ip: Coordinate) -> bool {
    current.is_none_or(|c| distance_meters(c, ip) > IP_FALLBACK_THRESHOLD_M)
}
