//! Domain types for the walking tour planner.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod coordinate;
mod error;
mod kind;
mod mood;
mod place;
mod route;
mod trip;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::DomainError;
pub use kind::PlaceKind;
pub use mood::Mood;
pub use place::{Category, Place, PlaceId, RawPlace};
pub use route::{Leg, LegEstimate, Route, RouteStep};
pub use trip::{Tour, TripSummary};
