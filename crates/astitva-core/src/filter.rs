//! Search-box style filtering and display formatting.

use crate::poi::{Category, PointOfInterest};

/// Keeps points whose name or category label contains `query`
/// (case-insensitive), optionally restricted to a single category.
///
/// A blank `query` matches every point.
#[must_use]
pub fn filter_points(
    points: Vec<PointOfInterest>,
    query: Option<&str>,
    category: Option<Category>,
) -> Vec<PointOfInterest> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    points
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            needle.as_deref().is_none_or(|n| {
                p.name.to_lowercase().contains(n) || p.category.label().to_lowercase().contains(n)
            })
        })
        .collect()
}

/// Formats a distance for display: whole meters below 1 km, one decimal of
/// kilometers above.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    let meters = meters.max(0.0);
    if meters.round() < 1_000.0 {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::poi::OpenStatus;

    fn poi(name: &str, category: Category) -> PointOfInterest {
        PointOfInterest {
            id: name.to_string(),
            name: name.to_string(),
            category,
            coordinate: Coordinate::new(0.0, 0.0).unwrap(),
            opening_hours: None,
            phone: None,
            distance_m: 0.0,
            status: OpenStatus::Unknown,
        }
    }

    fn sample() -> Vec<PointOfInterest> {
        vec![
            poi("City Hospital", Category::Hospital),
            poi("Apollo Pharmacy", Category::Pharmacy),
            poi("Connaught Place Police Post", Category::Police),
        ]
    }

    fn names(points: &[PointOfInterest]) -> Vec<&str> {
        points.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn blank_query_matches_all() {
        assert_eq!(filter_points(sample(), None, None).len(), 3);
        assert_eq!(filter_points(sample(), Some("  "), None).len(), 3);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let hits = filter_points(sample(), Some("apollo"), None);
        assert_eq!(names(&hits), ["Apollo Pharmacy"]);
    }

    #[test]
    fn query_matches_category_label() {
        let hits = filter_points(sample(), Some("medical"), None);
        assert_eq!(names(&hits), ["Apollo Pharmacy"]);
    }

    #[test]
    fn category_restricts_results() {
        let hits = filter_points(sample(), Some("p"), Some(Category::Police));
        assert_eq!(names(&hits), ["Connaught Place Police Post"]);
    }

    #[test]
    fn formats_meters_and_kilometers() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(349.6), "350 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(999.6), "1.0 km");
        assert_eq!(format_distance(1_234.0), "1.2 km");
        assert_eq!(format_distance(-3.0), "0 m");
    }
}
