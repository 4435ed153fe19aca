//! Trip aggregation.
//!
//! Measures a finished route leg by leg and annotates each stop with the
//! walk that reaches it.

use tracing::debug;

use crate::domain::{Coordinate, Leg, Route, TripSummary};
use crate::oracle::{TravelTimeOracle, TravelTimes};

/// Walk `route` from `start`, annotating every stop with its incoming leg.
///
/// Issues one oracle query per leg, sequentially: start to first stop, then
/// each consecutive pair. Totals are the exact sum of those legs; legs the
/// oracle could not estimate count as zero. An empty route costs no
/// queries.
pub async fn summarize_trip<O: TravelTimeOracle>(
    route: &mut Route,
    start: Coordinate,
    oracle: &O,
) -> TripSummary {
    let times = TravelTimes::new(oracle);
    let mut summary = TripSummary::default();

    let stops: Vec<Coordinate> = route.places().map(|p| p.coordinate).collect();
    let mut from = start;

    for (index, &to) in stops.iter().enumerate() {
        let estimate = times.pairwise(from, to).await;
        summary.add_leg(&estimate);
        route.annotate(
            index,
            Leg {
                estimate,
                from_start: index == 0,
            },
        );
        from = to;
    }

    debug!(
        legs = summary.legs,
        total_km = summary.total_km,
        total_minutes = summary.total_minutes,
        "trip summarized"
    );

    summary
}
