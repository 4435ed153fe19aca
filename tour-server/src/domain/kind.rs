//! Catalog of place kinds a user can ask for.
//!
//! Each kind maps a user-facing choice to the provider type filters used to
//! discover it and to the tour category it counts towards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Category, DomainError};

/// A user-selectable kind of place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Restaurants,
    Cafes,
    Attractions,
    Parks,
    Shopping,
    Entertainment,
}

impl PlaceKind {
    /// Every kind, in menu order.
    pub const ALL: [PlaceKind; 6] = [
        PlaceKind::Restaurants,
        PlaceKind::Cafes,
        PlaceKind::Attractions,
        PlaceKind::Parks,
        PlaceKind::Shopping,
        PlaceKind::Entertainment,
    ];

    /// Stable key used in URLs and request bodies.
    pub fn key(self) -> &'static str {
        match self {
            PlaceKind::Restaurants => "restaurants",
            PlaceKind::Cafes => "cafes",
            PlaceKind::Attractions => "attractions",
            PlaceKind::Parks => "parks",
            PlaceKind::Shopping => "shopping",
            PlaceKind::Entertainment => "entertainment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaceKind::Restaurants => "Restaurants",
            PlaceKind::Cafes => "Cafes",
            PlaceKind::Attractions => "Attractions",
            PlaceKind::Parks => "Parks",
            PlaceKind::Shopping => "Shopping",
            PlaceKind::Entertainment => "Entertainment",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PlaceKind::Restaurants => "🍽️",
            PlaceKind::Cafes => "☕",
            PlaceKind::Attractions => "🏛️",
            PlaceKind::Parks => "🌳",
            PlaceKind::Shopping => "🛍️",
            PlaceKind::Entertainment => "🎭",
        }
    }

    /// Provider place types belonging to this kind.
    pub fn place_types(self) -> &'static [&'static str] {
        match self {
            PlaceKind::Restaurants => &["restaurant", "cafe"],
            PlaceKind::Cafes => &["cafe", "bakery"],
            PlaceKind::Attractions => &["tourist_attraction", "museum", "point_of_interest"],
            PlaceKind::Parks => &["park"],
            PlaceKind::Shopping => &["shopping_mall", "store"],
            PlaceKind::Entertainment => &["amusement_park", "night_club", "movie_theater"],
        }
    }

    /// The type filter sent to the provider. Only one type is accepted per
    /// nearby query, so this is the first of `place_types`.
    pub fn query_type(self) -> &'static str {
        self.place_types()[0]
    }

    pub fn category(self) -> Category {
        match self {
            PlaceKind::Restaurants | PlaceKind::Cafes => Category::Food,
            PlaceKind::Attractions
            | PlaceKind::Parks
            | PlaceKind::Shopping
            | PlaceKind::Entertainment => Category::Attraction,
        }
    }
}

impl FromStr for PlaceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        PlaceKind::ALL
            .into_iter()
            .find(|k| k.key() == key)
            .ok_or_else(|| DomainError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
