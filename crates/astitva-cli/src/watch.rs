//! `watch`: a stdin-driven stand-in for a device location stream.

use std::sync::Arc;

use anyhow::Context;
use astitva_core::{AppConfig, Coordinate};
use astitva_locator::{LocateOptions, LocationUpdate, LocatorSession, ResourceLocator, SessionEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::lookup::{describe_ip_location, ip_locator};
use crate::render::{render_view, DEFAULT_MAX_OTHERS};

/// Parses one input line.
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub(crate) fn parse_update_line(line: &str) -> anyhow::Result<Option<LocationUpdate>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("denied") {
        return Ok(Some(LocationUpdate::PermissionDenied));
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (lat, lon, accuracy) = match fields.as_slice() {
        [lat, lon] => (*lat, *lon, None),
        [lat, lon, accuracy] => (*lat, *lon, Some(*accuracy)),
        _ => anyhow::bail!("expected `lat,lon[,accuracy_m]` or `denied`, got {line:?}"),
    };

    let lat: f64 = lat.parse().with_context(|| format!("invalid latitude {lat:?}"))?;
    let lon: f64 = lon.parse().with_context(|| format!("invalid longitude {lon:?}"))?;
    let accuracy_m = accuracy
        .map(|a| {
            a.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .with_context(|| format!("invalid accuracy {a:?}"))
        })
        .transpose()?;

    Ok(Some(LocationUpdate::Position {
        coordinate: Coordinate::new(lat, lon)?,
        accuracy_m,
    }))
}

fn print_view(session: &LocatorSession, json: bool) -> anyhow::Result<()> {
    let Some(view) = session.view() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string(view)?);
    } else {
        if let Some(accuracy) = session.accuracy_m() {
            println!("(position accurate to about {accuracy:.0} m)");
        }
        print!("{}", render_view(view));
        println!();
    }
    Ok(())
}

/// Applies stdin updates to a session until EOF, printing each new view.
///
/// Malformed lines are logged and skipped.
///
/// # Errors
///
/// Returns an error if the locator cannot be built or stdin cannot be read.
pub(crate) async fn run_watch(
    config: &AppConfig,
    radius_m: Option<u32>,
    ip_fallback: bool,
    json: bool,
) -> anyhow::Result<()> {
    let locator = Arc::new(ResourceLocator::from_config(config)?);
    let options = LocateOptions {
        radius_m,
        max_others: Some(DEFAULT_MAX_OTHERS),
        ..LocateOptions::default()
    };
    let mut session = LocatorSession::new(locator, options);

    if ip_fallback {
        match ip_locator(config)?.locate().await {
            Ok(location) => {
                eprintln!("starting from IP location {}", describe_ip_location(&location));
                if session.apply_ip_fallback(location.coordinate).await == SessionEvent::Updated {
                    print_view(&session, json)?;
                }
            }
            Err(e) => tracing::warn!(error = %e, "ip geolocation failed; waiting for stdin"),
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0_usize;
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        line_no += 1;
        let update = match parse_update_line(&line) {
            Ok(Some(update)) => update,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping malformed update");
                continue;
            }
        };

        match session.apply(update).await {
            SessionEvent::Updated => print_view(&session, json)?,
            SessionEvent::PermissionDenied => {
                eprintln!("location permission denied; send `lat,lon` lines to continue");
            }
            SessionEvent::Ignored => {}
        }
    }

    tracing::debug!(lines = line_no, "stdin closed; watch finished");
    Ok(())
}
