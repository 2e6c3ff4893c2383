use astitva_core::{Category, Coordinate};
use astitva_locator::{LocateOptions, LocatorView};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_query_rejection, ApiError, ApiResponse, AppState};

/// Upper bound on a caller-supplied search radius.
pub(super) const MAX_RADIUS_M: u32 = 50_000;

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<u32>,
    /// Comma-separated categories to query.
    pub categories: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl NearbyQuery {
    fn into_request(self) -> Result<(Coordinate, LocateOptions), String> {
        let origin = Coordinate::new(self.lat, self.lon).map_err(|e| e.to_string())?;

        if let Some(radius) = self.radius {
            if radius == 0 || radius > MAX_RADIUS_M {
                return Err(format!("radius must be between 1 and {MAX_RADIUS_M} meters"));
            }
        }

        let categories = self
            .categories
            .as_deref()
            .map(parse_category_list)
            .transpose()?;
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| e.to_string())?;
        let query = self.q.filter(|q| !q.trim().is_empty());

        Ok((
            origin,
            LocateOptions {
                radius_m: self.radius,
                categories,
                query,
                category,
                max_others: self.limit,
            },
        ))
    }
}

fn parse_category_list(raw: &str) -> Result<Vec<Category>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Category>().map_err(|e| e.to_string()))
        .collect()
}

/// `GET /api/v1/resources/nearby`
///
/// A lookup failure still carries the view, with status 503.
pub(super) async fn nearby_resources(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LocatorView>>), ApiError> {
    let Query(query) = query.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;
    let (origin, options) = query
        .into_request()
        .map_err(|message| ApiError::validation(req_id.0.clone(), message))?;

    let view = state.locator.locate_with(origin, &options).await;
    let status = if view.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        request_id = %req_id.0,
        %origin,
        points = view.point_count(),
        status = status.as_u16(),
        "nearby resources served"
    );

    Ok((status, Json(ApiResponse::new(view, req_id.0))))
}
