use anyhow::Context;
use clap::Parser;
use saferoute::{
    sdk::config::ServiceConfig,
    sdk::routing::{CachedGeocoder, GeoCache, HttpGeocoder, HttpRouteService},
    sdk::util::{log::init_logging, rate_limit::geocode_limiter},
    ConsoleNotifier, GeoJsonMap, PlanOutcome, RoutePlanner, RouteType,
};
use std::{path::PathBuf, process::ExitCode, sync::Arc};

/// Find a risk-scored route between two places
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where the trip starts (e.g., "MG Road, Bengaluru")
    #[arg(short, long)]
    from: String,

    /// Where the trip ends
    #[arg(short, long)]
    to: String,

    /// Routing mode
    #[arg(long = "type", value_enum, default_value_t = RouteType::Balanced)]
    route_type: RouteType,

    /// [Optional] Time vs. risk weighting; blank or invalid means 0.5
    #[arg(long)]
    alpha: Option<String>,

    /// [Optional] Hour of travel (0-23), overrides SAFEROUTE_DEFAULT_HOUR
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
    hour: Option<u8>,

    /// Where to write the rendered route as GeoJSON
    #[arg(long, default_value = "route.geojson")]
    output: PathBuf,

    /// Geocode cache file
    #[arg(long, default_value = "geo_cache.json")]
    cache: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let config = ServiceConfig::from_env().context("Invalid SAFEROUTE_* configuration")?;
    let hour = cli.hour.unwrap_or(config.default_hour);
    log::info!(
        "Geocoder: {} | Route service: {} | hour={}",
        config.geocoder_url,
        config.route_service_url,
        hour
    );

    let cache = GeoCache::load_from_file(&cli.cache)
        .with_context(|| format!("Failed to read cache {}", cli.cache.display()))?;
    let geocoder = Arc::new(CachedGeocoder::new(
        HttpGeocoder::new(&config, geocode_limiter(config.geocode_per_minute))
            .context("Failed to build geocoding client")?,
        cache,
    ));
    let routes = HttpRouteService::new(&config).context("Failed to build route service client")?;

    let planner = RoutePlanner::new(
        geocoder.clone(),
        Arc::new(routes),
        Arc::new(ConsoleNotifier),
        GeoJsonMap::new(),
    )
    .with_hour(hour);

    let outcome = planner
        .compute_route(&cli.from, &cli.to, cli.route_type, cli.alpha.as_deref())
        .await;

    let renderer = planner.into_renderer();
    if matches!(outcome, PlanOutcome::Rendered(_) | PlanOutcome::Degenerate) {
        println!("{}", renderer.state().status());
    }

    let written = renderer
        .write_route_file(&cli.output)
        .with_context(|| format!("Failed to update {}", cli.output.display()))?;
    if written {
        log::info!("Route written to {}", cli.output.display());
    }

    let cache = geocoder.snapshot();
    cache
        .save_to_file(&cli.cache)
        .with_context(|| format!("Failed to save cache {}", cli.cache.display()))?;
    log::info!("Geocode cache saved ({} places)", cache.len());

    Ok(match outcome {
        PlanOutcome::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
