use crate::config::{Config, GeocodingGateway};
use anyhow::{bail, Context as _, Result};
use clap::Parser;
use delivmap_core::{
    gateways::map::MapRenderer as _,
    repositories::OrderRepo as _,
    usecases,
    util::retry::{RetryPolicy, ThreadSleep},
};
use delivmap_db_csv::CsvOrderStore;
use delivmap_gateways::{leaflet::LeafletMap, nominatim::Nominatim};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "delivmap",
    version,
    about = "Build a clustered delivery map from a CSV of order addresses"
)]
struct Args {
    /// CSV file with the order table
    csv_file: PathBuf,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the rendered map (overrides the configured path)
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Skip geocoding and render only rows that already have coordinates
    #[arg(long)]
    skip_geocoding: bool,
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_deref())
        .context("Failed to load the configuration")?;

    let store = CsvOrderStore::new(&args.csv_file);

    if args.skip_geocoding {
        log::info!("Skipping geocoding as requested");
    } else {
        let GeocodingGateway::Nominatim {
            ref user_agent,
            timeout,
            max_attempts,
        } = cfg.geocoding.gateway;
        log::info!("Geocoding addresses from '{}'", args.csv_file.display());
        let geocoder = Nominatim::new(user_agent, timeout)?;
        let policy = RetryPolicy {
            max_attempts,
            ..RetryPolicy::default()
        };
        let summary = usecases::resolve_order_locations(&store, &geocoder, &policy, &ThreadSleep)
            .with_context(|| {
                format!("Failed to geocode orders from '{}'", args.csv_file.display())
            })?;
        log::info!(
            "Geocoding finished: {} resolved, {} skipped, {} without result",
            summary.resolved,
            summary.skipped,
            summary.unresolved
        );
    }

    let orders = store
        .load_orders()
        .with_context(|| format!("Failed to read orders from '{}'", args.csv_file.display()))?;
    let classified = usecases::classify_orders(&orders, &cfg.colors, &cfg.boundary);
    if classified.outside_boundary > 0 {
        log::warn!(
            "{} orders lie outside the service area",
            classified.outside_boundary
        );
    }
    if classified.markers.is_empty() {
        bail!("There are no orders with resolved coordinates to render");
    }

    let renderer = LeafletMap {
        output: args.out.unwrap_or(cfg.map.output),
        zoom: cfg.map.zoom,
        tiles: cfg.map.tiles,
    };
    renderer.render_map(&classified.markers, &cfg.boundary)?;
    Ok(())
}
