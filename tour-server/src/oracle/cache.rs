//! Caching layer for travel-time estimates.
//!
//! Route construction asks for the same legs repeatedly: every nearest-stop
//! query re-measures the remaining pool, and trip aggregation re-measures
//! the chosen legs. Estimates are cached per (origin, destination) pair,
//! keyed by coordinates quantized to micro-degrees.
//!
//! Failed elements are never cached, so a transient failure is retried on
//! the next query.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, LegEstimate};

use super::TravelTimeOracle;
use super::error::OracleError;

/// Cache key: (origin, destination) in micro-degrees.
type PairKey = ((i64, i64), (i64, i64));

fn pair_key(origin: &Coordinate, destination: &Coordinate) -> PairKey {
    (origin.micro_degrees(), destination.micro_degrees())
}

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
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of leg estimates.
pub struct LegCache {
    legs: MokaCache<PairKey, LegEstimate>,
}

impl LegCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let legs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { legs }
    }

    /// Look up every destination. Returns `None` unless all are cached.
    pub async fn get_all(
        &self,
        origin: &Coordinate,
        destinations: &[Coordinate],
    ) -> Option<Vec<LegEstimate>> {
        let mut hits = Vec::with_capacity(destinations.len());
        for destination in destinations {
            hits.push(self.legs.get(&pair_key(origin, destination)).await?);
        }
        Some(hits)
    }

    /// Insert a leg estimate into the cache.
    pub async fn insert(&self, origin: &Coordinate, destination: &Coordinate, leg: LegEstimate) {
        self.legs.insert(pair_key(origin, destination), leg).await;
    }

}

/// Travel-time oracle with caching.
///
/// Wraps any oracle and answers repeated queries from the cache.
pub struct CachedOracle<O> {
    inner: O,
    cache: LegCache,
}

impl<O: TravelTimeOracle> CachedOracle<O> {
    /// Create a new cached oracle.
    pub fn new(inner: O, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: LegCache::new(cache_config),
        }
    }
}

impl<O: TravelTimeOracle> TravelTimeOracle for CachedOracle<O> {
    async fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        // Try cache first
        if let Some(cached) = self.cache.get_all(&origin, destinations).await {
            trace!(%origin, count = destinations.len(), "travel times served from cache");
            return Ok(cached.into_iter().map(Some).collect());
        }

        let estimates = self.inner.walking_matrix(origin, destinations).await?;

        for (destination, estimate) in destinations.iter().zip(&estimates) {
            if let Some(leg) = estimate {
                self.cache.insert(&origin, destination, leg.clone()).await;
            }
        }

        Ok(estimates)
    }
}
