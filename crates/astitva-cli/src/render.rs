//! Plain-text rendering of a locator view.

use std::fmt::Write as _;

use astitva_core::{format_distance, PointOfInterest};
use astitva_locator::LocatorView;

/// Other entries shown per category unless `--limit` says otherwise.
pub(crate) const DEFAULT_MAX_OTHERS: usize = 3;

const NAME_WIDTH: usize = 36;

/// Renders `view` as a per-category listing, nearest first.
pub(crate) fn render_view(view: &LocatorView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Resources within {} of {}",
        format_distance(f64::from(view.radius_m)),
        view.origin
    );

    if let Some(error) = &view.error {
        let _ = writeln!(out, "lookup failed ({:?}): {}", error.kind, error.message);
        return out;
    }

    if view.results.is_empty() {
        let _ = writeln!(out, "no resources found nearby");
        return out;
    }

    for (category, ranked) in &view.results {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", category.label());
        let _ = writeln!(out, "  * {}", render_point(&ranked.nearest));
        for other in &ranked.others {
            let _ = writeln!(out, "    {}", render_point(other));
        }
    }
    out
}

fn render_point(point: &PointOfInterest) -> String {
    let name = if point.name.chars().count() > NAME_WIDTH {
        format!(
            "{}...",
            point.name.chars().take(NAME_WIDTH - 3).collect::<String>()
        )
    } else {
        point.name.clone()
    };
    let mut line = format!(
        "{name:<NAME_WIDTH$} {:>8}  {}",
        format_distance(point.distance_m),
        point.status.label()
    );
    if let Some(phone) = &point.phone {
        let _ = write!(line, "  {phone}");
    }
    line
}
