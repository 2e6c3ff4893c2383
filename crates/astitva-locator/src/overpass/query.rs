//! Overpass QL construction.

use std::collections::BTreeSet;

use astitva_core::{Category, Coordinate};

/// Builds an Overpass QL query for amenity nodes of the given categories
/// within `radius_m` of `origin`. Name filtering happens client-side.
///
/// Categories are emitted in their canonical order so identical requests
/// produce byte-identical queries.
pub(crate) fn build_query(
    origin: Coordinate,
    radius_m: u32,
    categories: &BTreeSet<Category>,
    server_timeout_secs: u64,
) -> String {
    let mut query = format!("[out:json][timeout:{server_timeout_secs}];\n(\n");
    for category in categories {
        query.push_str(&format!(
            "  node[amenity={}](around:{radius_m},{},{});\n",
            category.amenity(),
            origin.latitude,
            origin.longitude
        ));
    }
    query.push_str(");\nout body;\n");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_union_of_requested_categories_in_canonical_order() {
        let origin = Coordinate::new(28.6139, 77.209).unwrap();
        let categories: BTreeSet<Category> = [Category::Pharmacy, Category::Hospital]
            .into_iter()
            .collect();
        let query = build_query(origin, 2000, &categories, 25);
        assert_eq!(
            query,
            "[out:json][timeout:25];\n(\n  \
             node[amenity=hospital](around:2000,28.6139,77.209);\n  \
             node[amenity=pharmacy](around:2000,28.6139,77.209);\n\
             );\nout body;\n"
        );
    }

    #[test]
    fn negative_coordinates_are_rendered_verbatim() {
        let origin = Coordinate::new(-33.8688, -70.5).unwrap();
        let categories: BTreeSet<Category> = [Category::Police].into_iter().collect();
        let query = build_query(origin, 500, &categories, 10);
        assert!(query.contains("node[amenity=police](around:500,-33.8688,-70.5);"));
    }
}
