//! Address lookup for trip locations.
//!
//! Resolves free-text locations (current position, pickup, dropoff) to
//! coordinates using a Nominatim-compatible service. Lookups are independent
//! of the simulation: a failed lookup never changes a computed schedule.

mod cache;
mod client;
mod error;

use std::future::Future;

pub use cache::{CacheConfig, CachedGeocoder};
pub use client::{GeocoderConfig, NominatimClient};
pub use error::GeocodeError;

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// `[latitude, longitude]` in degrees.
    pub coordinates: [f64; 2],

    /// Full display name reported by the geocoder.
    pub display_name: String,
}

/// Trait for resolving addresses.
///
/// This abstraction allows the web layer and cache to be tested with mock
/// data.
pub trait Geocoder {
    /// Look up the best match for `query`, or `None` when nothing matches.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Place>, GeocodeError>> + Send;
}
