use astitva_core::{directions_url, Coordinate, MapStyle, TravelMode};

/// Print a directions URL to `to`, starting from `from` when given.
///
/// # Errors
///
/// Returns an error if either coordinate is out of range.
pub(crate) fn run_directions(
    to: (f64, f64),
    from: Option<(f64, f64)>,
    mode: TravelMode,
) -> anyhow::Result<()> {
    let destination = Coordinate::new(to.0, to.1)?;
    let origin = from
        .map(|(lat, lon)| Coordinate::new(lat, lon))
        .transpose()?;
    println!("{}", directions_url(origin, destination, mode));
    Ok(())
}

pub(crate) fn run_tiles(style: MapStyle) {
    println!("style:       {}", style.as_str());
    println!("tiles:       {}", style.tile_url_template());
    println!("attribution: {}", style.attribution());
    println!("toggle:      {}", style.toggled().as_str());
}
