//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::{CachedGeocoder, NominatimClient};
use crate::planner::HosConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached address lookup
    pub geocoder: Arc<CachedGeocoder<NominatimClient>>,

    /// Hours-of-service rules and trip assumptions
    pub config: Arc<HosConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(geocoder: CachedGeocoder<NominatimClient>, config: HosConfig) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            config: Arc::new(config),
        }
    }
}
