use std::net::SocketAddr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hos_server::geocode::{CacheConfig, CachedGeocoder, GeocoderConfig, NominatimClient};
use hos_server::planner::HosConfig;
use hos_server::web::{AppState, create_router};

/// Listen address when `HOS_BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hos_server=info")),
        )
        .init();

    // Geocoder settings from environment
    let mut geocoder_config = GeocoderConfig::default();
    if let Ok(url) = std::env::var("NOMINATIM_BASE_URL") {
        geocoder_config = geocoder_config.with_base_url(url);
    }
    if let Ok(agent) = std::env::var("NOMINATIM_USER_AGENT") {
        geocoder_config = geocoder_config.with_user_agent(agent);
    } else {
        warn!("NOMINATIM_USER_AGENT not set; using the default agent string");
    }

    let client = NominatimClient::new(geocoder_config).expect("Failed to create geocoder client");
    let geocoder = CachedGeocoder::new(client, &CacheConfig::default());

    let hos_config = HosConfig::default();
    if let Err(e) = hos_config.validate() {
        error!("invalid hours-of-service configuration: {e}");
        std::process::exit(1);
    }

    let state = AppState::new(geocoder, hos_config);
    let app = create_router(state);

    let bind = std::env::var("HOS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = match bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("invalid HOS_BIND_ADDR {bind}: {e}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("HOS trip planner listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health           - Health check");
    info!("  GET  /api/assumptions  - Planning assumptions");
    info!("  POST /api/process      - Simulate a trip");
    info!("  POST /api/trip         - Simulate a trip and resolve its locations");
    info!("  GET  /api/geocode?q=   - Resolve one address");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
