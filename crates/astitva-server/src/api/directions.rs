use astitva_core::{directions_url, Coordinate, TravelMode};
use axum::{
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_query_rejection, ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsQuery {
    pub to_lat: f64,
    pub to_lon: f64,
    pub from_lat: Option<f64>,
    pub from_lon: Option<f64>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct DirectionsData {
    pub url: String,
    pub mode: TravelMode,
}

impl DirectionsQuery {
    fn resolve(&self) -> Result<DirectionsData, String> {
        let destination = Coordinate::new(self.to_lat, self.to_lon).map_err(|e| e.to_string())?;
        let origin = match (self.from_lat, self.from_lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon).map_err(|e| e.to_string())?),
            (None, None) => None,
            _ => return Err("from_lat and from_lon must be given together".to_string()),
        };
        let mode = match self.mode.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<TravelMode>().map_err(|e| e.to_string())?
            }
            _ => TravelMode::default(),
        };

        Ok(DirectionsData {
            url: directions_url(origin, destination, mode),
            mode,
        })
    }
}

/// `GET /api/v1/directions`
pub(super) async fn directions(
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<DirectionsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DirectionsData>>, ApiError> {
    let Query(query) = query.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;
    let data = query
        .resolve()
        .map_err(|message| ApiError::validation(req_id.0.clone(), message))?;
    Ok(Json(ApiResponse::new(data, req_id.0)))
}
