//! Trip totals and the finished tour.

use serde::Serialize;

use super::{LegEstimate, Mood, Route};

/// Aggregate walking distance and time over the legs of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TripSummary {
    pub total_km: f64,
    pub total_minutes: f64,
    /// Number of legs that were summed.
    pub legs: usize,
}

impl TripSummary {
    pub fn add_leg(&mut self, leg: &LegEstimate) {
        self.total_km += leg.distance_km();
        self.total_minutes += leg.duration_minutes();
        self.legs += 1;
    }

    /// Total distance for display, e.g. "3.25 km".
    pub fn distance_text(&self) -> String {
        format!("{:.2} km", self.total_km)
    }

    /// Whole minutes of walking, truncated.
    pub fn walking_minutes(&self) -> u64 {
        self.total_minutes as u64
    }
}

/// A planned tour: the annotated route and its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub mood: Mood,
    pub route: Route,
    pub summary: TripSummary,
}

impl Tour {
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}
