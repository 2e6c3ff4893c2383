//! The resource locator service: fetch, filter, rank, and fold failures into
//! a view a consumer can render directly.

use astitva_core::{
    filter_points, rank, truncate_ranking, AppConfig, Category, Coordinate, Ranking,
};
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, LocatorError};
use crate::overpass::OverpassClient;

/// Per-request overrides for [`ResourceLocator::locate_with`].
#[derive(Debug, Clone, Default)]
pub struct LocateOptions {
    /// Search radius; the locator default when `None`.
    pub radius_m: Option<u32>,
    /// Categories to query; the locator default when `None`.
    pub categories: Option<Vec<Category>>,
    /// Case-insensitive substring filter on name or category label.
    pub query: Option<String>,
    /// Keep only this category after fetching.
    pub category: Option<Category>,
    /// Cap on "other" entries per category.
    pub max_others: Option<usize>,
}

/// Error half of a [`LocatorView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewError {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&LocatorError> for ViewError {
    fn from(error: &LocatorError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Everything a consumer needs to render the nearby-resources panel.
///
/// When `error` is set, `results` is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorView {
    pub origin: Coordinate,
    pub radius_m: u32,
    pub results: Ranking,
    pub error: Option<ViewError>,
}

impl LocatorView {
    fn failed(origin: Coordinate, radius_m: u32, error: &LocatorError) -> Self {
        Self {
            origin,
            radius_m,
            results: Ranking::new(),
            error: Some(ViewError::from(error)),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Total points across all categories.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.results.values().map(astitva_core::RankedResult::len).sum()
    }
}

/// Turns a coordinate into a ranked view of nearby resources.
///
/// Owns its [`OverpassClient`]; construct once at startup and share by
/// reference or `Arc`.
pub struct ResourceLocator {
    overpass: OverpassClient,
    radius_m: u32,
    categories: Vec<Category>,
}

impl ResourceLocator {
    /// Creates a locator searching every [`Category`] within `radius_m`.
    #[must_use]
    pub fn new(overpass: OverpassClient, radius_m: u32) -> Self {
        Self {
            overpass,
            radius_m,
            categories: Category::ALL.to_vec(),
        }
    }

    /// Builds the Overpass client and locator from application config.
    ///
    /// # Errors
    ///
    /// Returns a [`LocatorError`] if the HTTP client cannot be built or the
    /// configured Overpass URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, LocatorError> {
        let overpass = OverpassClient::with_base_url(
            &config.overpass_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(overpass, config.search_radius_m))
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Locates resources around `origin` with the default options.
    pub async fn locate(&self, origin: Coordinate) -> LocatorView {
        self.locate_with(origin, &LocateOptions::default()).await
    }

    /// Locates resources around `origin`, evaluating opening hours against
    /// the local clock.
    pub async fn locate_with(&self, origin: Coordinate, options: &LocateOptions) -> LocatorView {
        self.locate_at(origin, options, Local::now().time()).await
    }

    /// Fetches, filters and ranks resources around `origin`.
    ///
    /// Never fails: a fetch error yields a view with `error` set and no
    /// results. Nothing is retried.
    pub async fn locate_at(
        &self,
        origin: Coordinate,
        options: &LocateOptions,
        now: NaiveTime,
    ) -> LocatorView {
        let radius_m = options.radius_m.unwrap_or(self.radius_m);
        let categories = options.categories.as_deref().unwrap_or(&self.categories);

        let points = match self
            .overpass
            .fetch_nearby_at(origin, radius_m, categories, now)
            .await
        {
            Ok(points) => points,
            Err(error) => {
                tracing::warn!(%origin, radius_m, error = %error, "nearby resource lookup failed");
                return LocatorView::failed(origin, radius_m, &error);
            }
        };

        let points = filter_points(points, options.query.as_deref(), options.category);
        let mut results = rank(origin, points);
        if let Some(max_others) = options.max_others {
            results = truncate_ranking(&results, max_others);
        }

        tracing::debug!(
            %origin,
            radius_m,
            categories = results.len(),
            "nearby resources ranked"
        );
        LocatorView {
            origin,
            radius_m,
            results,
            error: None,
        }
    }
}
