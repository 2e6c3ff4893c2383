//! Best-effort open/closed heuristic for OSM `opening_hours` values.
//!
//! Only the first `HH:MM-HH:MM` window in the string is considered. Day-of-week
//! rules, multiple intervals and windows that wrap past midnight are not
//! interpreted; a wrapping window such as `22:00-06:00` always reads as closed.

use std::sync::LazyLock;

use chrono::{Local, NaiveTime, Timelike};
use regex::Regex;

use crate::poi::OpenStatus;

static WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}):(\d{2})\s*-\s*(\d{2}):(\d{2})").expect("valid regex")
});

/// Derives an [`OpenStatus`] from an `opening_hours` value at time `now`.
///
/// Returns [`OpenStatus::Open`] when `now` lies within the window, both ends
/// inclusive at minute precision, [`OpenStatus::Closed`] when it does not, and
/// [`OpenStatus::Unknown`] when the value is missing, blank, has no window,
/// or names an impossible time.
#[must_use]
pub fn derive_status(opening_hours: Option<&str>, now: NaiveTime) -> OpenStatus {
    let Some(raw) = opening_hours.map(str::trim).filter(|s| !s.is_empty()) else {
        return OpenStatus::Unknown;
    };
    let Some((open, close)) = parse_window(raw) else {
        return OpenStatus::Unknown;
    };

    let current = now.hour() * 60 + now.minute();
    if open <= current && current <= close {
        OpenStatus::Open
    } else {
        OpenStatus::Closed
    }
}

/// [`derive_status`] evaluated against the host's local clock.
#[must_use]
pub fn derive_status_now(opening_hours: Option<&str>) -> OpenStatus {
    derive_status(opening_hours, Local::now().time())
}

/// Returns the first window as minutes since midnight.
fn parse_window(raw: &str) -> Option<(u32, u32)> {
    let caps = WINDOW_RE.captures(raw)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let open = to_minutes(field(1)?, field(2)?)?;
    let close = to_minutes(field(3)?, field(4)?)?;
    Some((open, close))
}

/// `24:00` is accepted as end of day, matching common OSM usage.
fn to_minutes(hour: u32, minute: u32) -> Option<u32> {
    match (hour, minute) {
        (24, 0) => Some(24 * 60),
        (0..=23, 0..=59) => Some(hour * 60 + minute),
        _ => None,
    }
}
