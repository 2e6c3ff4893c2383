//! Overpass response schema and conversion into [`PointOfInterest`].

use std::collections::{BTreeMap, BTreeSet};

use astitva_core::{derive_status, distance_meters, Category, Coordinate, PointOfInterest};
use chrono::NaiveTime;
use serde::Deserialize;

use crate::error::LocatorError;

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
    /// Set by Overpass when the query hit a runtime limit; `elements` is then
    /// incomplete.
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parses a raw response body into the typed schema.
pub(crate) fn parse_response(body: serde_json::Value) -> Result<OverpassResponse, LocatorError> {
    serde_json::from_value(body).map_err(|e| LocatorError::Deserialize {
        context: "overpass response".to_string(),
        source: e,
    })
}

/// Converts a response into points of interest.
///
/// Unnamed elements, non-node elements and amenities outside `requested`
/// are dropped. A retained node with missing or out-of-range coordinates
/// fails the whole conversion, as does a runtime-error remark.
pub(crate) fn into_points(
    response: OverpassResponse,
    origin: Coordinate,
    requested: &BTreeSet<Category>,
    now: NaiveTime,
) -> Result<Vec<PointOfInterest>, LocatorError> {
    if let Some(remark) = response.remark.as_deref() {
        if remark.contains("error") {
            return Err(LocatorError::Provider(remark.to_string()));
        }
    }

    let mut unnamed = 0usize;
    let mut points = Vec::with_capacity(response.elements.len());

    for element in response.elements {
        let Some(name) = element.tag("name") else {
            unnamed += 1;
            continue;
        };
        if element.kind != "node" {
            continue;
        }
        let Some(category) = element.tag("amenity").and_then(Category::from_amenity) else {
            tracing::debug!(id = element.id, name, "skipping element outside requested amenities");
            continue;
        };
        if !requested.contains(&category) {
            continue;
        }

        let context = format!("node/{}", element.id);
        let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
            return Err(LocatorError::Schema {
                context,
                reason: "node is missing lat/lon".to_string(),
            });
        };
        let coordinate = Coordinate::new(lat, lon).map_err(|e| LocatorError::Schema {
            context: context.clone(),
            reason: e.to_string(),
        })?;

        let opening_hours = element.tag("opening_hours").map(str::to_owned);
        let phone = element
            .tag("phone")
            .or_else(|| element.tag("contact:phone"))
            .map(str::to_owned);
        let status = derive_status(opening_hours.as_deref(), now);

        points.push(PointOfInterest {
            id: context,
            name: name.to_owned(),
            category,
            coordinate,
            opening_hours,
            phone,
            distance_m: distance_meters(origin, coordinate),
            status,
        });
    }

    tracing::debug!(
        retained = points.len(),
        unnamed,
        "converted overpass elements"
    );
    Ok(points)
}
