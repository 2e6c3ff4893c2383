use super::*;

#[test]
fn parses_nearby_with_coordinates_and_categories() {
    let cli = Cli::try_parse_from([
        "astitva",
        "nearby",
        "--lat",
        "28.6139",
        "--lon",
        "77.2090",
        "--category",
        "hospital",
        "--category",
        "Medical Store",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Nearby {
            lat,
            lon,
            categories,
            limit,
            json,
            ..
        } => {
            assert_eq!(lat, Some(28.6139));
            assert_eq!(lon, Some(77.2090));
            assert_eq!(categories, vec![Category::Hospital, Category::Pharmacy]);
            assert_eq!(limit, render::DEFAULT_MAX_OTHERS);
            assert!(!json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn nearby_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "astitva", "nearby", "--lat", "-33.8688", "--lon", "151.2093",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Nearby { lat: Some(lat), .. } if lat < 0.0
    ));
}

#[test]
fn nearby_without_coordinates_is_allowed() {
    let cli = Cli::try_parse_from(["astitva", "nearby", "--json"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Nearby {
            lat: None,
            lon: None,
            json: true,
            ..
        }
    ));
}

#[test]
fn nearby_requires_both_coordinates() {
    assert!(Cli::try_parse_from(["astitva", "nearby", "--lat", "28.6"]).is_err());
}

#[test]
fn nearby_rejects_zero_radius_and_unknown_category() {
    assert!(Cli::try_parse_from([
        "astitva", "nearby", "--lat", "1", "--lon", "1", "--radius", "0"
    ])
    .is_err());
    assert!(Cli::try_parse_from(["astitva", "nearby", "--category", "school"]).is_err());
}

#[test]
fn parses_watch_flags() {
    let cli = Cli::try_parse_from(["astitva", "watch", "--radius", "500", "--ip-fallback"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Watch {
            radius: Some(500),
            ip_fallback: true,
            json: false
        }
    ));
}

#[test]
fn parses_directions_with_mode_alias() {
    let cli = Cli::try_parse_from([
        "astitva",
        "directions",
        "--to-lat",
        "28.6145",
        "--to-lon",
        "77.2095",
        "--mode",
        "drive",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Directions {
            from_lat: None,
            mode: TravelMode::Driving,
            ..
        }
    ));
}

#[test]
fn tiles_default_to_street() {
    let cli = Cli::try_parse_from(["astitva", "tiles"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Tiles {
            style: MapStyle::Street
        }
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["astitva"]).is_err());
}

#[tokio::test]
async fn offline_commands_ignore_invalid_environment() {
    std::env::set_var("ASTITVA_BIND_ADDR", "not-an-address");

    let tiles = Cli::try_parse_from(["astitva", "tiles", "--style", "satellite"])
        .expect("expected valid cli args");
    let directions = Cli::try_parse_from([
        "astitva", "directions", "--to-lat", "28.6145", "--to-lon", "77.2095",
    ])
    .expect("expected valid cli args");

    let tiles_result = run(tiles).await;
    let directions_result = run(directions).await;
    std::env::remove_var("ASTITVA_BIND_ADDR");

    assert!(tiles_result.is_ok(), "tiles failed: {tiles_result:?}");
    assert!(
        directions_result.is_ok(),
        "directions failed: {directions_result:?}"
    );
}
