//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Coordinate, DomainError, Mood, PlaceKind, Tour};
use crate::planner::TourRequest;
use crate::session::{Session, Stage};

use super::maps::directions_url;

/// Request to plan a tour without a session.
#[derive(Debug, Deserialize)]
pub struct PlanTourRequest {
    /// Start latitude
    pub lat: f64,

    /// Start longitude
    pub lng: f64,

    /// "hungry" or "adventurous"
    pub mood: String,

    /// Kind keys, e.g. ["cafes", "parks"]
    pub kinds: Vec<String>,

    /// Attractions between food stops (defaults to server config)
    pub interleave: Option<usize>,
}

impl PlanTourRequest {
    /// Validate into a planner request.
    pub fn into_tour_request(self) -> Result<TourRequest, DomainError> {
        let start = Coordinate::new(self.lat, self.lng)?;
        let mood: Mood = self.mood.parse()?;
        let kinds = self
            .kinds
            .iter()
            .map(|k| k.parse::<PlaceKind>())
            .collect::<Result<Vec<_>, _>>()?;

        let request = TourRequest::new(start, mood, kinds);
        Ok(match self.interleave {
            Some(factor) => request.with_interleave_factor(factor),
            None => request,
        })
    }
}

/// Shared start location.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Chosen mood.
#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

/// A kind of place the user can pick.
#[derive(Debug, Serialize)]
pub struct KindResult {
    /// Stable key, e.g. "parks"
    pub key: &'static str,

    /// Display label
    pub label: &'static str,

    pub emoji: &'static str,

    /// "food" or "attraction"
    pub category: String,
}

impl KindResult {
    pub fn from_kind(kind: PlaceKind) -> Self {
        Self {
            key: kind.key(),
            label: kind.label(),
            emoji: kind.emoji(),
            category: kind.category().to_string(),
        }
    }
}

/// Response listing every selectable kind.
#[derive(Debug, Serialize)]
pub struct KindsResponse {
    pub kinds: Vec<KindResult>,
}

/// A stop on a planned tour.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,

    /// Kind key
    pub kind: &'static str,

    /// "food" or "attraction"
    pub category: String,

    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
    pub vicinity: String,

    /// Walking distance from the previous stop (or the start), in metres
    pub walk_meters: Option<u64>,

    /// Walking time from the previous stop (or the start), in seconds
    pub walk_seconds: Option<u64>,

    /// Human-readable leg, e.g. "1.2 km (15 mins) from start"
    pub walk: Option<String>,
}

/// Response for tour planning.
#[derive(Debug, Serialize)]
pub struct TourResponse {
    pub mood: Mood,

    /// Stops in visiting order
    pub stops: Vec<StopResult>,

    /// Total walking distance in kilometres
    pub total_km: f64,

    /// Total walking time in minutes
    pub total_minutes: f64,

    /// Google Maps walking directions (absent for an empty tour)
    pub directions_url: Option<String>,
}

/// Session snapshot.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub stage: Stage,
    pub location: Option<Coordinate>,
    pub mood: Option<Mood>,

    /// Selected kind keys, in selection order
    pub kinds: Vec<&'static str>,

    pub tour: Option<TourResponse>,

    /// When the session last changed
    pub last_activity: DateTime<Utc>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl TourResponse {
    /// Create from a planned tour starting at `start`.
    pub fn from_tour(tour: &Tour, start: Coordinate) -> Self {
        let stops = tour
            .route
            .steps()
            .iter()
            .map(|step| {
                let place = &step.place;
                let leg = step.leg.as_ref().filter(|l| !l.estimate.is_unavailable());
                StopResult {
                    id: place.id.to_string(),
                    name: place.name.clone(),
                    kind: place.kind().key(),
                    category: place.category().to_string(),
                    lat: place.coordinate.lat(),
                    lng: place.coordinate.lng(),
                    rating: place.rating,
                    vicinity: place.vicinity.clone(),
                    walk_meters: leg.map(|l| l.estimate.distance_meters),
                    walk_seconds: leg.map(|l| l.estimate.duration_seconds),
                    walk: step.leg.as_ref().map(|l| l.describe()),
                }
            })
            .collect();

        Self {
            mood: tour.mood,
            stops,
            total_km: tour.summary.total_km,
            total_minutes: tour.summary.total_minutes,
            directions_url: directions_url(start, &tour.route),
        }
    }
}

impl SessionResponse {
    pub fn from_session(id: Uuid, session: &Session) -> Self {
        let tour = match (session.tour(), session.location()) {
            (Some(tour), Some(start)) => Some(TourResponse::from_tour(tour, start)),
            _ => None,
        };

        Self {
            id,
            stage: session.stage(),
            location: session.location(),
            mood: session.mood(),
            kinds: session.kinds().iter().map(|k| k.key()).collect(),
            tour,
            last_activity: session.last_activity(),
        }
    }
}
