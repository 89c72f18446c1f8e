//! Caching layer for geocoder lookups.
//!
//! Trip requests tend to repeat the same handful of terminals, and the public
//! Nominatim instance rate-limits aggressively. Successful lookups (including
//! "no match") are cached; errors are not.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::error::GeocodeError;
use super::{Geocoder, Place};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Queries are keyed case-insensitively with surrounding whitespace removed.
pub struct CachedGeocoder<G> {
    inner: G,
    places: MokaCache<String, Option<Place>>,
}

impl<G: Geocoder + Sync> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    /// Look up `query`, using the cache if available.
    ///
    /// A blank query never reaches the geocoder.
    pub async fn lookup(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        let key = cache_key(query);
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(cached) = self.places.get(&key).await {
            return Ok(cached);
        }

        let place = self.inner.lookup(query.trim()).await?;
        self.places.insert(key, place.clone()).await;

        Ok(place)
    }

    #[cfg(test)]
    fn inner(&self) -> &G {
        &self.inner
    }

    #[cfg(test)]
    fn invalidate_cache(&self) {
        self.places.invalidate_all();
    }
}

fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Geocoder that knows one place and counts how often it is asked.
    #[derive(Default)]
    struct MockGeocoder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Geocoder for MockGeocoder {
        async fn lookup(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GeocodeError::Api {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            Ok((query == "Chicago, IL").then(|| Place {
                coordinates: [41.88, -87.62],
                display_name: "Chicago, Illinois".into(),
            }))
        }
    }

    fn calls(cached: &CachedGeocoder<MockGeocoder>) -> usize {
        cached.inner().calls.load(Ordering::SeqCst)
    }

    #[test]
    fn key_normalisation() {
        assert_eq!(cache_key("  Chicago, IL "), "chicago, il");
        assert_eq!(cache_key("\t"), "");
    }

    #[tokio::test]
    async fn second_lookup_is_cached() {
        let cached = CachedGeocoder::new(MockGeocoder::default(), &CacheConfig::default());

        let first = cached.lookup("Chicago, IL").await.unwrap();
        let second = cached.lookup(" chicago, il").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().coordinates, [41.88, -87.62]);
        assert_eq!(calls(&cached), 1);
    }

    #[tokio::test]
    async fn misses_are_cached() {
        let cached = CachedGeocoder::new(MockGeocoder::default(), &CacheConfig::default());

        assert_eq!(cached.lookup("Atlantis").await.unwrap(), None);
        assert_eq!(cached.lookup("Atlantis").await.unwrap(), None);
        assert_eq!(calls(&cached), 1);
    }

    #[tokio::test]
    async fn blank_query_skips_geocoder() {
        let cached = CachedGeocoder::new(MockGeocoder::default(), &CacheConfig::default());

        assert_eq!(cached.lookup("   ").await.unwrap(), None);
        assert_eq!(calls(&cached), 0);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockGeocoder {
            fail: true,
            ..MockGeocoder::default()
        };
        let cached = CachedGeocoder::new(mock, &CacheConfig::default());

        assert!(cached.lookup("Chicago, IL").await.is_err());
        assert!(cached.lookup("Chicago, IL").await.is_err());
        assert_eq!(calls(&cached), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedGeocoder::new(MockGeocoder::default(), &CacheConfig::default());

        cached.lookup("Chicago, IL").await.unwrap();
        cached.invalidate_cache();
        cached.lookup("Chicago, IL").await.unwrap();

        assert_eq!(calls(&cached), 2);
    }
}
