//! End-to-end tour planning.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domain::{Coordinate, Mood, PlaceKind, Tour};
use crate::oracle::TravelTimeOracle;
use crate::places::{PlaceProvider, discover};

use super::aggregate::summarize_trip;
use super::candidates::build_candidate_set_with_limit;
use super::config::PlannerConfig;
use super::construct::construct_route;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TourRequest {
    pub start: Coordinate,
    pub mood: Mood,
    pub kinds: Vec<PlaceKind>,
    /// Overrides the configured interleave factor.
    #[serde(default)]
    pub interleave_factor: Option<usize>,
}

impl TourRequest {
    /// Create a request. Repeated kinds are dropped, keeping the first.
    pub fn new(start: Coordinate, mood: Mood, kinds: impl IntoIterator<Item = PlaceKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self {
            start,
            mood,
            kinds: unique,
            interleave_factor: None,
        }
    }

    pub fn with_interleave_factor(mut self, factor: usize) -> Self {
        self.interleave_factor = Some(factor);
        self
    }
}

/// Plan a tour: discover, rank, order, then measure.
///
/// Never fails. Provider and oracle failures shrink or degrade the tour; if
/// nothing is found the tour is empty.
#[instrument(skip_all, fields(mood = %request.mood, start = %request.start))]
pub async fn plan_tour<P, O>(
    request: &TourRequest,
    provider: &P,
    oracle: &O,
    config: &PlannerConfig,
) -> Tour
where
    P: PlaceProvider,
    O: TravelTimeOracle,
{
    let mut groups = discover(provider, request.start, &request.kinds, config.radius_m).await;
    for group in &mut groups {
        group.places.truncate(config.per_kind_limit);
    }

    let candidates = build_candidate_set_with_limit(groups, config.candidate_limit());
    let candidate_count = candidates.len();

    let interleave = request
        .interleave_factor
        .unwrap_or(config.interleave_factor);
    let mut route =
        construct_route(candidates, request.start, request.mood, interleave, oracle).await;
    let summary = summarize_trip(&mut route, request.start, oracle).await;

    info!(
        candidates = candidate_count,
        stops = route.len(),
        km = summary.total_km,
        minutes = summary.total_minutes,
        "tour planned"
    );

    Tour {
        mood: request.mood,
        route,
        summary,
    }
}
