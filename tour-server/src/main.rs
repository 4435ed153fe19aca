use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tour_server::config::ServerConfig;
use tour_server::oracle::{
    CacheConfig, CachedOracle, DistanceMatrixClient, OracleBackend, OracleConfig,
    StraightLineOracle,
};
use tour_server::places::{FixturePlaces, PlaceBackend, PlacesClient, PlacesConfig};
use tour_server::planner::PlannerConfig;
use tour_server::web::{AppState, SessionStore, create_router};

/// Pick the place provider and oracle for this configuration.
fn backends(config: &ServerConfig) -> Result<(PlaceBackend, OracleBackend), Box<dyn Error>> {
    match &config.api_key {
        Some(key) => {
            let mut places_config = PlacesConfig::new(key);
            let mut oracle_config = OracleConfig::new(key);
            if let Some(base) = &config.api_base {
                places_config = places_config.with_base_url(base);
                oracle_config = oracle_config.with_base_url(base);
            }
            Ok((
                PlaceBackend::Google(PlacesClient::new(places_config)?),
                OracleBackend::DistanceMatrix(DistanceMatrixClient::new(oracle_config)?),
            ))
        }
        None => {
            warn!(
                fixtures = %config.fixtures_dir.display(),
                "GOOGLE_MAPS_API_KEY not set, running offline with fixture places"
            );
            Ok((
                PlaceBackend::Fixture(FixturePlaces::new(&config.fixtures_dir)?),
                OracleBackend::StraightLine(StraightLineOracle::new()),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let (places, oracle) = backends(&config)?;
    info!(places = places.name(), oracle = oracle.name(), "backends ready");

    let oracle = CachedOracle::new(oracle, &CacheConfig::default());
    let state = AppState::new(
        places,
        oracle,
        PlannerConfig::default(),
        SessionStore::default(),
    );

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Walking Tour Planner listening");
    info!("  GET  /health           - Health check");
    info!("  GET  /api/kinds        - Selectable kinds of place");
    info!("  POST /tour/plan        - Plan a tour");
    info!("  POST /session          - Start a planning session");

    axum::serve(listener, app).await?;
    Ok(())
}
