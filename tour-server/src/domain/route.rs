//! Routes: ordered stops annotated with the walking leg that reaches them.

use serde::Serialize;

use super::{Category, Place};

/// Walking distance and duration between two points, as reported by a
/// travel-time oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegEstimate {
    pub distance_meters: u64,
    /// Human-readable distance, e.g. "1.2 km"
    pub distance_text: String,
    pub duration_seconds: u64,
    /// Human-readable duration, e.g. "15 mins"
    pub duration_text: String,
}

impl LegEstimate {
    pub fn new(
        distance_meters: u64,
        distance_text: impl Into<String>,
        duration_seconds: u64,
        duration_text: impl Into<String>,
    ) -> Self {
        Self {
            distance_meters,
            distance_text: distance_text.into(),
            duration_seconds,
            duration_text: duration_text.into(),
        }
    }

    /// Placeholder for a leg the oracle could not estimate.
    pub fn unavailable() -> Self {
        Self::new(0, "N/A", 0, "N/A")
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters as f64 / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds as f64 / 60.0
    }
}

/// How a stop was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub estimate: LegEstimate,
    /// True for the leg from the tour's start coordinate to the first stop.
    pub from_start: bool,
}

impl Leg {
    /// Short description, e.g. "1.2 km (15 mins) from start".
    pub fn describe(&self) -> String {
        let base = format!(
            "{} ({})",
            self.estimate.distance_text, self.estimate.duration_text
        );
        if self.from_start {
            format!("{base} from start")
        } else {
            base
        }
    }
}

/// A place on a route together with its incoming leg, once known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub place: Place,
    pub leg: Option<Leg>,
}

/// An ordered sequence of stops.
///
/// Stops are appended during construction. After that, only leg annotations
/// change; stops are never reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route {
    steps: Vec<RouteStep>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stop with no leg annotation yet.
    pub fn push(&mut self, place: Place) {
        self.steps.push(RouteStep { place, leg: None });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.steps.iter().map(|s| &s.place)
    }

    pub fn last_category(&self) -> Option<Category> {
        self.steps.last().map(|s| s.place.category())
    }

    /// Record the leg that reaches stop `index`. Out-of-range indices are
    /// ignored.
    pub fn annotate(&mut self, index: usize, leg: Leg) {
        if let Some(step) = self.steps.get_mut(index) {
            step.leg = Some(leg);
        }
    }
}
