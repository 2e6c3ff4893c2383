//! HTTP client for an Overpass API interpreter.
//!
//! Sends one union query per fetch and validates the JSON answer against an
//! explicit schema before handing back typed [`PointOfInterest`] records.

mod query;
mod response;

use std::collections::BTreeSet;

use astitva_core::{Category, Coordinate, PointOfInterest};
use chrono::{Local, NaiveTime};
use reqwest::{Client, Url};

use crate::error::LocatorError;
use crate::http::{build_client, get_json, parse_base_url};

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client for an Overpass interpreter endpoint.
///
/// Use [`OverpassClient::new`] for the public instance or
/// [`OverpassClient::with_base_url`] to point at a mirror or mock server.
pub struct OverpassClient {
    client: Client,
    base_url: Url,
    server_timeout_secs: u64,
}

impl OverpassClient {
    /// Creates a client for the public `overpass-api.de` instance.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LocatorError> {
        Self::with_base_url(DEFAULT_OVERPASS_URL, timeout_secs, user_agent)
    }

    /// Creates a client for a custom interpreter URL.
    ///
    /// `timeout_secs` bounds the HTTP request and is also sent to Overpass as
    /// the server-side `[timeout:N]` budget.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`LocatorError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LocatorError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
            server_timeout_secs: timeout_secs.max(1),
        })
    }

    /// Fetches named points of interest near `origin`, evaluating opening
    /// hours against the local clock.
    ///
    /// # Errors
    ///
    /// See [`OverpassClient::fetch_nearby_at`].
    pub async fn fetch_nearby(
        &self,
        origin: Coordinate,
        radius_m: u32,
        categories: &[Category],
    ) -> Result<Vec<PointOfInterest>, LocatorError> {
        self.fetch_nearby_at(origin, radius_m, categories, Local::now().time())
            .await
    }

    /// Fetches named points of interest of `categories` within `radius_m`
    /// meters of `origin`, in provider order.
    ///
    /// Each point carries its distance from `origin` and an open/closed
    /// status evaluated at `now`. An empty `categories` slice returns an
    /// empty result without a request.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::InvalidRequest`] if `radius_m` is zero.
    /// - [`LocatorError::Http`] on network failure.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx status.
    /// - [`LocatorError::Deserialize`] or [`LocatorError::Schema`] if the
    ///   body does not match the Overpass schema.
    /// - [`LocatorError::Provider`] if Overpass reports a runtime error.
    pub async fn fetch_nearby_at(
        &self,
        origin: Coordinate,
        radius_m: u32,
        categories: &[Category],
        now: NaiveTime,
    ) -> Result<Vec<PointOfInterest>, LocatorError> {
        if radius_m == 0 {
            return Err(LocatorError::InvalidRequest(
                "search radius must be greater than zero".to_string(),
            ));
        }
        let requested: BTreeSet<Category> = categories.iter().copied().collect();
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let query = query::build_query(origin, radius_m, &requested, self.server_timeout_secs);
        let url = self.build_url(&query);
        tracing::debug!(%origin, radius_m, categories = requested.len(), "querying overpass");

        let body = get_json(&self.client, &url, "overpass response").await?;
        let parsed = response::parse_response(body)?;
        response::into_points(parsed, origin, &requested, now)
    }

    /// Appends the QL query as the `data` parameter.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("data", query);
        url
    }
}

/// Exposes the query text so callers (and tests) can match requests.
#[must_use]
pub fn overpass_query(
    origin: Coordinate,
    radius_m: u32,
    categories: &[Category],
    timeout_secs: u64,
) -> String {
    let requested: BTreeSet<Category> = categories.iter().copied().collect();
    query::build_query(origin, radius_m, &requested, timeout_secs.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_percent_encodes_query() {
        let client =
            OverpassClient::with_base_url("https://overpass.example/api/interpreter", 25, "test")
                .expect("client");
        let url = client.build_url("[out:json];node(around:10,1,2);out;");
        assert!(url
            .as_str()
            .starts_with("https://overpass.example/api/interpreter?data="));
        assert!(!url.as_str().contains('['), "brackets must be encoded: {url}");
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = OverpassClient::with_base_url("not a url", 25, "test");
        assert!(matches!(result, Err(LocatorError::InvalidBaseUrl { .. })));
    }
}
