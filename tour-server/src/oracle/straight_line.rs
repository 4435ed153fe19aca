//! Offline travel-time oracle.
//!
//! Estimates walking legs from great-circle distance at a constant pace.
//! Useful for development without API access and as a deterministic
//! oracle in tests.

use crate::domain::{Coordinate, LegEstimate};

use super::TravelTimeOracle;
use super::error::OracleError;

/// Default walking pace in metres per second (about 5 km/h).
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 1.4;

/// Oracle that walks in straight lines.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineOracle {
    speed_mps: f64,
}

impl StraightLineOracle {
    pub fn new() -> Self {
        Self {
            speed_mps: DEFAULT_WALKING_SPEED_MPS,
        }
    }

    /// Set a custom walking pace. Non-positive values keep the default.
    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        if speed_mps.is_finite() && speed_mps > 0.0 {
            self.speed_mps = speed_mps;
        }
        self
    }

    /// Estimate a single leg.
    pub fn estimate(&self, origin: &Coordinate, destination: &Coordinate) -> LegEstimate {
        let meters = origin.haversine_meters(destination).round() as u64;
        let seconds = (meters as f64 / self.speed_mps).round() as u64;
        LegEstimate::new(
            meters,
            format_distance(meters),
            seconds,
            format_duration(seconds),
        )
    }
}

impl Default for StraightLineOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelTimeOracle for StraightLineOracle {
    async fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        Ok(destinations
            .iter()
            .map(|d| Some(self.estimate(&origin, d)))
            .collect())
    }
}

/// Format a distance the way Google Maps does: metres below 1 km,
/// otherwise kilometres with one decimal.
pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

/// Format a duration the way Google Maps does, e.g. "1 min", "12 mins",
/// "1 hour 5 mins". Durations round to the nearest minute, at least 1.
pub fn format_duration(seconds: u64) -> String {
    let total_mins = ((seconds + 30) / 60).max(1);
    let hours = total_mins / 60;
    let mins = total_mins % 60;

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match (hours, mins) {
        (0, m) => plural(m, "min"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "min")),
    }
}
