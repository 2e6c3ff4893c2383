mod lookup;
mod maps;
mod render;
mod watch;

use astitva_core::{AppConfig, Category, MapStyle, TravelMode};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Upper bound on `--radius`, matching the HTTP API.
const MAX_RADIUS_M: i64 = 50_000;

#[derive(Debug, Parser)]
#[command(name = "astitva")]
#[command(about = "Find the nearest hospitals, police stations and medical stores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank nearby resources around a position
    Nearby {
        /// Latitude in degrees; IP geolocation is used when omitted
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Search radius in meters (defaults to `ASTITVA_SEARCH_RADIUS_M`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_RADIUS_M))]
        radius: Option<u32>,
        /// Category to query; repeat for several (defaults to all)
        #[arg(long = "category")]
        categories: Vec<Category>,
        /// Keep only resources whose name or type contains this text
        #[arg(long)]
        search: Option<String>,
        /// Maximum "other" entries shown per category
        #[arg(long, default_value_t = render::DEFAULT_MAX_OTHERS)]
        limit: usize,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the approximate position derived from the public IP
    Locate {
        /// Print the location as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read position updates from stdin and re-rank after each one
    ///
    /// Each line is `lat,lon[,accuracy_m]` or `denied`.
    Watch {
        /// Search radius in meters (defaults to `ASTITVA_SEARCH_RADIUS_M`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_RADIUS_M))]
        radius: Option<u32>,
        /// Seed the session with an IP-geolocated position before reading stdin
        #[arg(long)]
        ip_fallback: bool,
        /// Print each view as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Print a maps URL with directions to a destination
    Directions {
        #[arg(long, allow_negative_numbers = true)]
        to_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_lon: f64,
        #[arg(long, requires = "from_lon", allow_negative_numbers = true)]
        from_lat: Option<f64>,
        #[arg(long, requires = "from_lat", allow_negative_numbers = true)]
        from_lon: Option<f64>,
        /// `walking` or `driving`
        #[arg(long, default_value = "walking")]
        mode: TravelMode,
    },
    /// Print the tile source for a map style
    Tiles {
        /// `street` or `satellite`
        #[arg(long, default_value = "street")]
        style: MapStyle,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    run(cli).await
}

/// Loads configuration and installs the tracing subscriber.
///
/// Only commands that talk to a provider call this, so `directions` and
/// `tiles` work even when the environment holds an invalid value.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = astitva_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Nearby {
            lat,
            lon,
            radius,
            categories,
            search,
            limit,
            json,
        } => {
            let config = load_config()?;
            let request = lookup::NearbyRequest {
                position: lat.zip(lon),
                radius_m: radius,
                categories,
                search,
                limit,
                json,
            };
            lookup::run_nearby(&config, request).await?;
        }
        Commands::Locate { json } => lookup::run_locate(&load_config()?, json).await?,
        Commands::Watch {
            radius,
            ip_fallback,
            json,
        } => watch::run_watch(&load_config()?, radius, ip_fallback, json).await?,
        Commands::Directions {
            to_lat,
            to_lon,
            from_lat,
            from_lon,
            mode,
        } => maps::run_directions((to_lat, to_lon), from_lat.zip(from_lon), mode)?,
        Commands::Tiles { style } => maps::run_tiles(style),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
