//! One-shot `nearby` and `locate` commands.

use astitva_core::{AppConfig, Category, Coordinate};
use astitva_locator::{IpLocation, IpLocator, LocateOptions, ResourceLocator};

use crate::render::render_view;

/// Arguments for [`run_nearby`], gathered from the `nearby` subcommand.
#[derive(Debug)]
pub(crate) struct NearbyRequest {
    pub position: Option<(f64, f64)>,
    pub radius_m: Option<u32>,
    pub categories: Vec<Category>,
    pub search: Option<String>,
    pub limit: usize,
    pub json: bool,
}

impl NearbyRequest {
    fn options(&self) -> LocateOptions {
        LocateOptions {
            radius_m: self.radius_m,
            categories: (!self.categories.is_empty()).then(|| self.categories.clone()),
            query: self.search.clone().filter(|s| !s.trim().is_empty()),
            category: None,
            max_others: Some(self.limit),
        }
    }
}

pub(crate) fn ip_locator(config: &AppConfig) -> anyhow::Result<IpLocator> {
    Ok(IpLocator::with_url(
        &config.ip_geolocation_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?)
}

pub(crate) fn describe_ip_location(location: &IpLocation) -> String {
    let place: Vec<&str> = [&location.city, &location.region, &location.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    if place.is_empty() {
        location.coordinate.to_string()
    } else {
        format!("{} ({})", location.coordinate, place.join(", "))
    }
}

/// Rank resources around the given position, or the IP-derived one.
///
/// # Errors
///
/// Returns an error if coordinates are invalid, IP geolocation fails, or the
/// lookup itself fails.
pub(crate) async fn run_nearby(config: &AppConfig, request: NearbyRequest) -> anyhow::Result<()> {
    let origin = match request.position {
        Some((lat, lon)) => Coordinate::new(lat, lon)?,
        None => {
            let location = ip_locator(config)?.locate().await?;
            eprintln!(
                "using approximate location from IP: {}",
                describe_ip_location(&location)
            );
            location.coordinate
        }
    };

    let locator = ResourceLocator::from_config(config)?;
    let view = locator.locate_with(origin, &request.options()).await;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view(&view));
    }

    if let Some(error) = view.error {
        anyhow::bail!("nearby lookup failed ({:?}): {}", error.kind, error.message);
    }
    Ok(())
}

/// Print the position reported by IP geolocation.
///
/// # Errors
///
/// Returns an error if the geolocation request fails.
pub(crate) async fn run_locate(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let location = ip_locator(config)?.locate().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&location)?);
    } else {
        println!("{}", describe_ip_location(&location));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NearbyRequest {
        NearbyRequest {
            position: Some((28.6139, 77.2090)),
            radius_m: None,
            categories: Vec::new(),
            search: None,
            limit: 3,
            json: false,
        }
    }

    #[test]
    fn empty_category_list_means_locator_default() {
        let options = request().options();
        assert!(options.categories.is_none());
        assert_eq!(options.max_others, Some(3));
    }

    #[test]
    fn blank_search_is_dropped() {
        let mut req = request();
        req.search = Some("  ".to_string());
        req.categories = vec![Category::Police];
        let options = req.options();
        assert!(options.query.is_none());
        assert_eq!(options.categories, Some(vec![Category::Police]));
    }

    #[test]
    fn ip_location_description_lists_known_parts() {
        let location = IpLocation {
            coordinate: Coordinate::new(28.6139, 77.209).unwrap(),
            city: Some("New Delhi".to_string()),
            region: None,
            country: Some("India".to_string()),
        };
        assert_eq!(
            describe_ip_location(&location),
            "28.6139,77.209 (New Delhi, India)"
        );

        let bare = IpLocation {
            city: None,
            country: None,
            ..location
        };
        assert_eq!(describe_ip_location(&bare), "28.6139,77.209");
    }
}
