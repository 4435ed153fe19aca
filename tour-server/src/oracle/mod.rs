//! Travel-time oracle.
//!
//! This module provides walking-time estimates between coordinates, with
//! a Google Distance Matrix backend, an offline straight-line backend and a
//! cache that can wrap either.
//!
//! Planner code never sees an oracle error: it goes through
//! [`TravelTimes`], which turns every failure into a sentinel value (for
//! single legs) or an empty result (for batches) and logs it.

mod cache;
mod client;
mod error;
mod straight_line;
mod types;

use std::future::Future;

use tracing::warn;

use crate::domain::{Coordinate, LegEstimate};

pub use cache::{CacheConfig, CachedOracle, LegCache};
pub use client::{DistanceMatrixClient, OracleConfig};
pub use error::OracleError;
pub use straight_line::{
    DEFAULT_WALKING_SPEED_MPS, StraightLineOracle, format_distance, format_duration,
};
pub use types::{DistanceMatrixResponse, MatrixElement, MatrixRow, TextValue};

/// A source of walking-time estimates.
///
/// This abstraction allows the planner to be tested with deterministic
/// fakes.
pub trait TravelTimeOracle: Send + Sync {
    /// Estimate walking legs from `origin` to each destination.
    ///
    /// On success the result has one entry per destination, in order;
    /// `None` marks a destination the backend could not route to.
    fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> impl Future<Output = Result<Vec<Option<LegEstimate>>, OracleError>> + Send;
}

/// Failure-safe view of an oracle.
///
/// Borrowed for the duration of one planning request.
#[derive(Debug)]
pub struct TravelTimes<'a, O> {
    oracle: &'a O,
}

impl<O> Clone for TravelTimes<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for TravelTimes<'_, O> {}

impl<'a, O: TravelTimeOracle> TravelTimes<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Walking leg from `origin` to `destination`.
    ///
    /// Returns [`LegEstimate::unavailable`] on any failure.
    pub async fn pairwise(&self, origin: Coordinate, destination: Coordinate) -> LegEstimate {
        match self.oracle.walking_matrix(origin, &[destination]).await {
            Ok(row) if row.len() == 1 => match row.into_iter().next().flatten() {
                Some(leg) => leg,
                None => {
                    warn!(%origin, %destination, "no walking route between points");
                    LegEstimate::unavailable()
                }
            },
            Ok(row) => {
                warn!(
                    %origin,
                    %destination,
                    elements = row.len(),
                    "malformed travel-time response"
                );
                LegEstimate::unavailable()
            }
            Err(e) => {
                warn!(%origin, %destination, error = %e, "travel-time query failed");
                LegEstimate::unavailable()
            }
        }
    }

    /// Walking legs from `origin` to each destination, aligned by index.
    ///
    /// Each element independently succeeds or fails. If the whole request
    /// fails, the result is empty and the caller must fall back on its own.
    /// An empty destination list issues no request.
    pub async fn batch(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Vec<Option<LegEstimate>> {
        if destinations.is_empty() {
            return Vec::new();
        }

        match self.oracle.walking_matrix(origin, destinations).await {
            Ok(row) if row.len() == destinations.len() => row,
            Ok(row) => {
                warn!(
                    %origin,
                    expected = destinations.len(),
                    actual = row.len(),
                    "malformed travel-time response"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(%origin, count = destinations.len(), error = %e, "travel-time batch failed");
                Vec::new()
            }
        }
    }
}

/// The oracle backends the server can run with.
pub enum OracleBackend {
    DistanceMatrix(DistanceMatrixClient),
    StraightLine(StraightLineOracle),
}

impl OracleBackend {
    pub fn name(&self) -> &'static str {
        match self {
            OracleBackend::DistanceMatrix(_) => "distance-matrix",
            OracleBackend::StraightLine(_) => "straight-line",
        }
    }
}

impl TravelTimeOracle for OracleBackend {
    async fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        match self {
            OracleBackend::DistanceMatrix(client) => {
                client.walking_matrix(origin, destinations).await
            }
            OracleBackend::StraightLine(oracle) => {
                oracle.walking_matrix(origin, destinations).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    /// Oracle returning a scripted reply and counting queries.
    struct ScriptedOracle {
        reply: fn(usize) -> Result<Vec<Option<LegEstimate>>, OracleError>,
        calls: Mutex<usize>,
    }

    impl ScriptedOracle {
        fn new(reply: fn(usize) -> Result<Vec<Option<LegEstimate>>, OracleError>) -> Self {
            Self {
                reply,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl TravelTimeOracle for ScriptedOracle {
        async fn walking_matrix(
            &self,
            _origin: Coordinate,
            destinations: &[Coordinate],
        ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
            *self.calls.lock().unwrap() += 1;
            (self.reply)(destinations.len())
        }
    }

    fn leg() -> LegEstimate {
        LegEstimate::new(400, "400 m", 300, "5 mins")
    }

    #[tokio::test]
    async fn pairwise_success() {
        let oracle = ScriptedOracle::new(|_| Ok(vec![Some(leg())]));
        let times = TravelTimes::new(&oracle);

        let result = times.pairwise(coord(0.0, 0.0), coord(0.0, 0.01)).await;
        assert_eq!(result, leg());
    }

    #[tokio::test]
    async fn pairwise_error_gives_sentinel() {
        let oracle = ScriptedOracle::new(|_| Err(OracleError::RateLimited));
        let times = TravelTimes::new(&oracle);

        let result = times.pairwise(coord(0.0, 0.0), coord(0.0, 0.01)).await;
        assert!(result.is_unavailable());
    }

    #[tokio::test]
    async fn pairwise_failed_element_gives_sentinel() {
        let oracle = ScriptedOracle::new(|_| Ok(vec![None]));
        let times = TravelTimes::new(&oracle);

        let result = times.pairwise(coord(0.0, 0.0), coord(0.0, 0.01)).await;
        assert_eq!(result, LegEstimate::unavailable());
    }

    #[tokio::test]
    async fn pairwise_malformed_gives_sentinel() {
        let oracle = ScriptedOracle::new(|_| Ok(vec![]));
        let times = TravelTimes::new(&oracle);

        let result = times.pairwise(coord(0.0, 0.0), coord(0.0, 0.01)).await;
        assert!(result.is_unavailable());
    }

    #[tokio::test]
    async fn batch_keeps_per_element_status() {
        let oracle = ScriptedOracle::new(|_| Ok(vec![Some(leg()), None, Some(leg())]));
        let times = TravelTimes::new(&oracle);
        let destinations = [coord(0.0, 0.01), coord(0.0, 0.02), coord(0.0, 0.03)];

        let row = times.batch(coord(0.0, 0.0), &destinations).await;
        assert_eq!(row, vec![Some(leg()), None, Some(leg())]);
    }

    #[tokio::test]
    async fn batch_failure_is_empty() {
        let oracle = ScriptedOracle::new(|_| Err(OracleError::Unauthorized));
        let times = TravelTimes::new(&oracle);

        let row = times.batch(coord(0.0, 0.0), &[coord(0.0, 0.01)]).await;
        assert!(row.is_empty());
    }

    #[tokio::test]
    async fn batch_misaligned_is_empty() {
        let oracle = ScriptedOracle::new(|n| Ok(vec![Some(leg()); n + 1]));
        let times = TravelTimes::new(&oracle);

        let row = times.batch(coord(0.0, 0.0), &[coord(0.0, 0.01)]).await;
        assert!(row.is_empty());
    }

    #[tokio::test]
    async fn batch_of_nothing_issues_no_query() {
        let oracle = ScriptedOracle::new(|_| Ok(vec![]));
        let times = TravelTimes::new(&oracle);

        let row = times.batch(coord(0.0, 0.0), &[]).await;
        assert!(row.is_empty());
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn backend_dispatch() {
        let backend = OracleBackend::StraightLine(StraightLineOracle::new());
        assert_eq!(backend.name(), "straight-line");

        let row = backend
            .walking_matrix(coord(0.0, 0.0), &[coord(0.0, 0.01)])
            .await
            .unwrap();
        assert_eq!(row.len(), 1);
        assert!(row[0].is_some());
    }
}
