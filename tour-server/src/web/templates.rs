//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Coordinate, PlaceKind, Tour};

use super::maps::directions_url;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the planning form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub kinds: Vec<KindView>,
}

impl IndexTemplate {
    pub fn new() -> Self {
        Self {
            kinds: PlaceKind::ALL.into_iter().map(KindView::from_kind).collect(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Planned tour fragment.
#[derive(Template)]
#[template(path = "tour_results.html")]
pub struct TourResultsTemplate {
    pub tour: TourView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A selectable kind of place.
#[derive(Debug, Clone)]
pub struct KindView {
    pub key: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub is_food: bool,
}

impl KindView {
    pub fn from_kind(kind: PlaceKind) -> Self {
        Self {
            key: kind.key(),
            label: kind.label(),
            emoji: kind.emoji(),
            is_food: kind.category() == crate::domain::Category::Food,
        }
    }
}

/// Tour view model for templates.
#[derive(Debug, Clone)]
pub struct TourView {
    /// e.g. "hungry traveller"
    pub traveller: &'static str,
    pub distance_text: String,
    pub walking_minutes: u64,
    pub stops: Vec<StopView>,
    /// Empty when the tour has no stops.
    pub directions_url: String,
}

impl TourView {
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn has_directions(&self) -> bool {
        !self.directions_url.is_empty()
    }

    /// Create from a domain Tour.
    pub fn from_tour(tour: &Tour, start: Coordinate) -> Self {
        let stops = tour
            .route
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| StopView {
                number: i + 1,
                emoji: step.place.kind().emoji(),
                name: step.place.name.clone(),
                label: step.place.label(),
                vicinity: step.place.vicinity.clone(),
                rating: step.place.rating_text(),
                walk: step
                    .leg
                    .as_ref()
                    .map(|l| l.describe())
                    .unwrap_or_else(|| "...".to_string()),
            })
            .collect();

        Self {
            traveller: tour.mood.traveller(),
            distance_text: tour.summary.distance_text(),
            walking_minutes: tour.summary.walking_minutes(),
            stops,
            directions_url: directions_url(start, &tour.route).unwrap_or_default(),
        }
    }
}

/// One stop in the tour view.
#[derive(Debug, Clone)]
pub struct StopView {
    pub number: usize,
    pub emoji: &'static str,
    pub name: String,
    pub label: &'static str,
    pub vicinity: String,
    pub rating: String,
    pub walk: String,
}
