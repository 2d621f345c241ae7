use crate::sdk::routing::cache::GeoCache;
use crate::sdk::routing::error::GeocodeError;
use crate::sdk::routing::service::Geocoder;
use crate::sdk::routing::types::Coordinate;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Wraps another geocoder and remembers the first candidate per place.
///
/// A hit answers without touching the network. Failures are never cached, so a
/// transient outage does not stick.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Mutex<GeoCache>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, cache: GeoCache) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
        }
    }

    /// Copy of the current cache contents, for persisting.
    pub fn snapshot(&self) -> GeoCache {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn search(&self, query: &str) -> Result<Vec<Coordinate>, GeocodeError> {
        let hit = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_geocode(query);
        if let Some(coord) = hit {
            log::debug!("[CACHE HIT] {}", query);
            return Ok(vec![coord]);
        }

        let candidates = self.inner.search(query).await?;
        if let Some(first) = candidates.first() {
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert_geocode(query, *first);
        }
        Ok(candidates)
    }
}
