//! Nearest-first ranking and the nearest/others partition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::{distance_meters, Coordinate};
use crate::poi::{Category, PointOfInterest};

/// The closest point in a category plus the rest, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub nearest: PointOfInterest,
    pub others: Vec<PointOfInterest>,
}

impl RankedResult {
    /// Returns a copy keeping at most `max_others` of the remaining points.
    #[must_use]
    pub fn truncated(&self, max_others: usize) -> Self {
        Self {
            nearest: self.nearest.clone(),
            others: self.others.iter().take(max_others).cloned().collect(),
        }
    }

    /// Number of points in this category, `nearest` included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.others.len()
    }

    /// Always `false`; a result only exists for a non-empty category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

pub type Ranking = BTreeMap<Category, RankedResult>;

/// Groups `points` by category and orders each group by distance from
/// `origin`.
///
/// Distances are recomputed from `origin`, so the result does not depend on
/// whatever `distance_m` the points carried in. The sort is stable: points
/// at equal distance keep the order the provider returned them in.
/// Categories with no points get no entry.
#[must_use]
pub fn rank(origin: Coordinate, points: Vec<PointOfInterest>) -> Ranking {
    let mut grouped: BTreeMap<Category, Vec<PointOfInterest>> = BTreeMap::new();
    for mut point in points {
        point.distance_m = distance_meters(origin, point.coordinate);
        grouped.entry(point.category).or_default().push(point);
    }

    grouped
        .into_iter()
        .filter_map(|(category, mut list)| {
            list.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
            let mut iter = list.into_iter();
            let nearest = iter.next()?;
            Some((
                category,
                RankedResult {
                    nearest,
                    others: iter.collect(),
                },
            ))
        })
        .collect()
}

/// Applies [`RankedResult::truncated`] to every category.
#[must_use]
pub fn truncate_ranking(ranking: &Ranking, max_others: usize) -> Ranking {
    ranking
        .iter()
        .map(|(category, result)| (*category, result.truncated(max_others)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::OpenStatus;

    /// Meters per degree of latitude for the haversine radius.
    const M_PER_DEG: f64 = 6_371_000.0 * std::f64::consts::PI / 180.0;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    /// A point due north of the origin at roughly `meters`.
    fn poi(id: &str, category: Category, meters: f64) -> PointOfInterest {
        PointOfInterest {
            id: id.to_string(),
            name: format!("Place {id}"),
            category,
            coordinate: Coordinate::new(meters / M_PER_DEG, 0.0).unwrap(),
            opening_hours: None,
            phone: None,
            distance_m: 0.0,
            status: OpenStatus::Unknown,
        }
    }

    #[test]
    fn nearest_is_first_of_tied_minimum_and_others_are_sorted() {
        let points = vec![
            poi("a", Category::Hospital, 300.0),
            poi("b", Category::Hospital, 50.0),
            poi("c", Category::Hospital, 900.0),
            poi("d", Category::Hospital, 50.0),
        ];
        let ranking = rank(origin(), points);
        let hospitals = ranking.get(&Category::Hospital).expect("hospital entry");

        assert_eq!(hospitals.nearest.id, "b", "first 50 m point wins the tie");
        let ids: Vec<&str> = hospitals.others.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["d", "a", "c"]);

        let dists: Vec<i64> = hospitals
            .others
            .iter()
            .map(|p| p.distance_m.round() as i64)
            .collect();
        assert_eq!(dists, [50, 300, 900]);
    }

    #[test]
    fn empty_input_produces_no_entries() {
        let ranking = rank(origin(), Vec::new());
        assert!(ranking.is_empty());
    }

    #[test]
    fn missing_category_has_no_entry() {
        let ranking = rank(origin(), vec![poi("p", Category::Police, 120.0)]);
        assert!(ranking.contains_key(&Category::Police));
        assert!(!ranking.contains_key(&Category::Hospital));
        assert!(!ranking.contains_key(&Category::Pharmacy));
        assert!(ranking[&Category::Police].others.is_empty());
    }

    #[test]
    fn categories_are_ranked_independently() {
        let points = vec![
            poi("h1", Category::Hospital, 700.0),
            poi("x1", Category::Pharmacy, 10.0),
            poi("h2", Category::Hospital, 200.0),
            poi("x2", Category::Pharmacy, 5.0),
        ];
        let ranking = rank(origin(), points);
        assert_eq!(ranking[&Category::Hospital].nearest.id, "h2");
        assert_eq!(ranking[&Category::Pharmacy].nearest.id, "x2");
        assert_eq!(ranking[&Category::Pharmacy].len(), 2);
    }

    #[test]
    fn rank_overwrites_stale_distances() {
        let mut stale = poi("s", Category::Police, 400.0);
        stale.distance_m = 1.0;
        let ranking = rank(origin(), vec![stale]);
        let d = ranking[&Category::Police].nearest.distance_m;
        assert!((d - 400.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn truncate_caps_others() {
        let points = (0..6)
            .map(|i| poi(&i.to_string(), Category::Hospital, 100.0 * f64::from(i + 1)))
            .collect();
        let ranking = truncate_ranking(&rank(origin(), points), 3);
        let hospitals = &ranking[&Category::Hospital];
        assert_eq!(hospitals.nearest.id, "0");
        assert_eq!(hospitals.others.len(), 3);
        assert_eq!(hospitals.others[2].id, "3");
    }
}
