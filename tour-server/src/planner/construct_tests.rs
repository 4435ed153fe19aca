//! Behavioural tests for greedy route construction.

use std::sync::Mutex;

use proptest::prelude::*;

use super::construct::construct_route;
use crate::domain::{Category, Coordinate, LegEstimate, Mood, Place, PlaceId, PlaceKind};
use crate::oracle::{OracleError, StraightLineOracle, TravelTimeOracle};

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

fn food(id: &str, lat: f64, lng: f64) -> Place {
    Place::new(PlaceId::new(id), id, coord(lat, lng), PlaceKind::Restaurants)
}

fn attraction(id: &str, lat: f64, lng: f64) -> Place {
    Place::new(PlaceId::new(id), id, coord(lat, lng), PlaceKind::Parks)
}

fn ids(route: &crate::domain::Route) -> Vec<String> {
    route.places().map(|p| p.id.to_string()).collect()
}

/// Straight-line oracle that records the size of every query.
struct RecordingOracle {
    inner: StraightLineOracle,
    queries: Mutex<Vec<usize>>,
}

impl RecordingOracle {
    fn new() -> Self {
        Self {
            inner: StraightLineOracle::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn query_sizes(&self) -> Vec<usize> {
        self.queries.lock().unwrap().clone()
    }
}

impl TravelTimeOracle for RecordingOracle {
    async fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        self.queries.lock().unwrap().push(destinations.len());
        self.inner.walking_matrix(origin, destinations).await
    }
}

/// Fails every query.
struct DownOracle;

impl TravelTimeOracle for DownOracle {
    async fn walking_matrix(
        &self,
        _origin: Coordinate,
        _destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        Err(OracleError::Unauthorized)
    }
}

/// Answers with the wrong number of elements.
struct ShortOracle;

impl TravelTimeOracle for ShortOracle {
    async fn walking_matrix(
        &self,
        _origin: Coordinate,
        _destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        Ok(vec![Some(LegEstimate::new(1, "1 m", 1, "1 min"))])
    }
}

// ============================================================================
// Fixed scenarios
// ============================================================================

#[tokio::test]
async fn hungry_walk_along_a_line() {
    let oracle = RecordingOracle::new();
    let candidates = vec![
        food("A", 0.0, 0.0),
        attraction("B", 0.0, 1.0),
        attraction("C", 0.0, 2.0),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    assert_eq!(ids(&route), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn adventurous_starts_with_nearest_attraction() {
    let oracle = RecordingOracle::new();
    let candidates = vec![
        food("A", 0.0, 0.0),
        attraction("B", 0.0, 1.0),
        attraction("C", 0.0, 2.0),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Adventurous, 2, &oracle).await;

    assert_eq!(ids(&route), vec!["B", "C", "A"]);
}

#[tokio::test]
async fn leading_category_falls_through_when_empty() {
    let oracle = RecordingOracle::new();
    let candidates = vec![attraction("far", 0.0, 0.02), attraction("near", 0.0, 0.01)];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    assert_eq!(ids(&route), vec!["near", "far"]);
}

#[tokio::test]
async fn picks_nearest_from_current_stop() {
    let oracle = RecordingOracle::new();
    // From the start, "west" is nearest; from "west", "far-west" beats "east".
    let candidates = vec![
        attraction("east", 0.0, 0.015),
        attraction("west", 0.0, -0.01),
        attraction("far-west", 0.0, -0.03),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Adventurous, 5, &oracle).await;

    assert_eq!(ids(&route), vec!["west", "far-west", "east"]);
}

#[tokio::test]
async fn interleaves_food_between_attraction_runs() {
    let oracle = RecordingOracle::new();
    let candidates = vec![
        food("F1", 0.0, 0.001),
        food("F2", 0.0, 0.004),
        attraction("A1", 0.0, 0.002),
        attraction("A2", 0.0, 0.003),
        attraction("A3", 0.0, 0.005),
        attraction("A4", 0.0, 0.006),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    assert_eq!(ids(&route), vec!["F1", "A1", "A2", "F2", "A3", "A4"]);
}

#[tokio::test]
async fn empty_candidates_make_no_queries() {
    let oracle = RecordingOracle::new();

    let route = construct_route(Vec::new(), coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    assert!(route.is_empty());
    assert!(oracle.query_sizes().is_empty());
}

#[tokio::test]
async fn one_query_per_stop_over_shrinking_pools() {
    let oracle = RecordingOracle::new();
    let candidates = vec![
        food("F1", 0.0, 0.001),
        food("F2", 0.0, 0.004),
        attraction("A1", 0.0, 0.002),
        attraction("A2", 0.0, 0.003),
        attraction("A3", 0.0, 0.005),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    // F1 (food pool 2), A1 (3), A2 (2), F2 (1), A3 (1).
    assert_eq!(route.len(), 5);
    assert_eq!(oracle.query_sizes(), vec![2, 3, 2, 1, 1]);
}

#[tokio::test]
async fn total_oracle_failure_keeps_pool_order() {
    let candidates = vec![
        food("F1", 0.0, 0.04),
        food("F2", 0.0, 0.001),
        attraction("A1", 0.0, 0.03),
        attraction("A2", 0.0, 0.02),
        attraction("A3", 0.0, 0.01),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &DownOracle).await;

    assert_eq!(ids(&route), vec!["F1", "A1", "A2", "F2", "A3"]);
}

#[tokio::test]
async fn misaligned_response_is_a_total_failure() {
    let candidates = vec![
        attraction("A1", 0.0, 0.03),
        attraction("A2", 0.0, 0.01),
    ];

    let route =
        construct_route(candidates, coord(0.0, 0.0), Mood::Adventurous, 2, &ShortOracle).await;

    assert_eq!(ids(&route), vec!["A1", "A2"]);
}

#[tokio::test]
async fn food_heavy_input_terminates() {
    let oracle = RecordingOracle::new();
    let candidates = vec![
        food("F1", 0.0, 0.001),
        food("F2", 0.0, 0.002),
        food("F3", 0.0, 0.003),
        food("F4", 0.0, 0.0045),
        attraction("A1", 0.0, 0.0026),
    ];

    let route = construct_route(candidates, coord(0.0, 0.0), Mood::Hungry, 2, &oracle).await;

    assert_eq!(ids(&route), vec!["F1", "A1", "F3", "F2", "F4"]);
}

#[tokio::test]
async fn zero_factor_behaves_like_one() {
    let candidates = || {
        vec![
            food("F1", 0.0, 0.001),
            food("F2", 0.0, 0.003),
            attraction("A1", 0.0, 0.002),
            attraction("A2", 0.0, 0.004),
        ]
    };
    let start = coord(0.0, 0.0);
    let oracle = StraightLineOracle::new();

    let zero = construct_route(candidates(), start, Mood::Hungry, 0, &oracle).await;
    let one = construct_route(candidates(), start, Mood::Hungry, 1, &oracle).await;

    assert_eq!(ids(&zero), vec!["F1", "A1", "F2", "A2"]);
    assert_eq!(ids(&zero), ids(&one));
}

#[tokio::test]
async fn construction_leaves_legs_unset() {
    let candidates = vec![food("F1", 0.0, 0.001)];

    let route = construct_route(
        candidates,
        coord(0.0, 0.0),
        Mood::Hungry,
        2,
        &StraightLineOracle::new(),
    )
    .await;

    assert!(route.steps().iter().all(|s| s.leg.is_none()));
}

// ============================================================================
// Properties
// ============================================================================

fn place_strategy() -> impl Strategy<Value = (bool, f64, f64)> {
    (any::<bool>(), -0.05f64..0.05, -0.05f64..0.05)
}

fn candidates_from(specs: &[(bool, f64, f64)]) -> Vec<Place> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(is_food, lat, lng))| {
            let id = format!("p{i}");
            if is_food {
                food(&id, lat, lng)
            } else {
                attraction(&id, lat, lng)
            }
        })
        .collect()
}

fn build(specs: &[(bool, f64, f64)], mood: Mood, factor: usize) -> Vec<Place> {
    let route = futures::executor::block_on(construct_route(
        candidates_from(specs),
        coord(0.0, 0.0),
        mood,
        factor,
        &StraightLineOracle::new(),
    ));
    route.places().cloned().collect()
}

fn mood_strategy() -> impl Strategy<Value = Mood> {
    prop_oneof![Just(Mood::Hungry), Just(Mood::Adventurous)]
}

proptest! {
    #[test]
    fn route_is_a_permutation_of_candidates(
        specs in prop::collection::vec(place_strategy(), 0..9),
        mood in mood_strategy(),
        factor in 0usize..4,
    ) {
        let route = build(&specs, mood, factor);

        let mut got: Vec<String> = route.iter().map(|p| p.id.to_string()).collect();
        let mut want: Vec<String> = (0..specs.len()).map(|i| format!("p{i}")).collect();
        got.sort();
        want.sort();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn first_stop_follows_mood(
        specs in prop::collection::vec(place_strategy(), 1..9),
        mood in mood_strategy(),
        factor in 0usize..4,
    ) {
        let route = build(&specs, mood, factor);
        let has_leading = specs
            .iter()
            .any(|&(is_food, _, _)| is_food == (mood.leading_category() == Category::Food));

        if has_leading {
            prop_assert_eq!(route[0].category(), mood.leading_category());
        }
    }

    #[test]
    fn food_repeats_only_after_attractions_run_out(
        specs in prop::collection::vec(place_strategy(), 0..9),
        mood in mood_strategy(),
        factor in 0usize..4,
    ) {
        let route = build(&specs, mood, factor);

        for i in 1..route.len() {
            if route[i - 1].is_food() && route[i].is_food() {
                prop_assert!(route[i..].iter().all(Place::is_food));
            }
        }
    }

    #[test]
    fn long_attraction_runs_only_after_food_runs_out(
        specs in prop::collection::vec(place_strategy(), 0..9),
        mood in mood_strategy(),
        factor in 0usize..4,
    ) {
        let route = build(&specs, mood, factor);
        let limit = factor.max(1) + 1;

        let mut run = 0;
        for (i, place) in route.iter().enumerate() {
            if place.is_food() {
                run = 0;
                continue;
            }
            run += 1;
            if run > limit {
                prop_assert!(route[i..].iter().all(|p| !p.is_food()));
            }
        }
    }

    #[test]
    fn construction_is_deterministic(
        specs in prop::collection::vec(place_strategy(), 0..9),
        mood in mood_strategy(),
        factor in 0usize..4,
    ) {
        prop_assert_eq!(build(&specs, mood, factor), build(&specs, mood, factor));
    }
}
