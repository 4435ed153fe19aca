//! Tour planning.
//!
//! Turns discovered places into an ordered walking tour in three steps:
//! rank and cap the candidates, order them greedily by walking time while
//! alternating food and attractions, then measure every leg.

mod aggregate;
mod candidates;
mod config;
mod construct;
mod tour;

#[cfg(test)]
mod construct_tests;

pub use aggregate::summarize_trip;
pub use candidates::{
    CandidateSet, build_candidate_set, build_candidate_set_with_limit, rank_by_popularity,
};
pub use config::{DEFAULT_INTERLEAVE_FACTOR, MAX_CANDIDATES, PlannerConfig};
pub use construct::construct_route;
pub use tour::{TourRequest, plan_tour};
