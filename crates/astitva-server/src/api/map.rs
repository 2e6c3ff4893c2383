use astitva_core::MapStyle;
use axum::{
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_query_rejection, ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct TilesQuery {
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TileSource {
    pub style: MapStyle,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl From<MapStyle> for TileSource {
    fn from(style: MapStyle) -> Self {
        Self {
            style,
            url_template: style.tile_url_template(),
            attribution: style.attribution(),
        }
    }
}

/// `GET /api/v1/map/tiles`
pub(super) async fn tile_source(
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<TilesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<TileSource>>, ApiError> {
    let Query(query) = query.map_err(|e| map_query_rejection(req_id.0.clone(), &e))?;
    let style = match query.style.as_deref() {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<MapStyle>()
            .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?,
        _ => MapStyle::default(),
    };
    Ok(Json(ApiResponse::new(TileSource::from(style), req_id.0)))
}
