//! Places of interest and their categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, PlaceKind};

/// The two categories a tour balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Attraction,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Food => f.write_str("food"),
            Category::Attraction => f.write_str("attraction"),
        }
    }
}

/// Provider-assigned place identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point of interest as reported by a place provider, before it has been
/// assigned a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlace {
    pub id: PlaceId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Average user rating, if the provider knows one.
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    /// Free-text address or vicinity.
    pub address: String,
    pub types: Vec<String>,
}

/// A candidate stop on a tour.
///
/// The category is fixed when the place is created from its kind and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub coordinate: Coordinate,
    category: Category,
    kind: PlaceKind,
    pub rating: Option<f64>,
    pub rating_count: u32,
    pub vicinity: String,
}

impl Place {
    /// Create a place of the given kind. Its category comes from the kind.
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        coordinate: Coordinate,
        kind: PlaceKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            category: kind.category(),
            kind,
            rating: None,
            rating_count: 0,
            vicinity: String::new(),
        }
    }

    /// Classify a raw provider record under `kind`.
    pub fn from_raw(raw: RawPlace, kind: PlaceKind) -> Self {
        Self {
            rating: raw.rating,
            rating_count: raw.rating_count.unwrap_or(0),
            vicinity: raw.address,
            ..Self::new(raw.id, raw.name, raw.coordinate, kind)
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> PlaceKind {
        self.kind
    }

    pub fn is_food(&self) -> bool {
        self.category == Category::Food
    }

    /// Popularity used for ranking. Unknown or non-finite ratings count as 0.
    pub fn popularity(&self) -> f64 {
        self.rating.filter(|r| r.is_finite()).unwrap_or(0.0)
    }

    /// Display label, e.g. "Parks".
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Rating for display, "N/A" when unknown.
    pub fn rating_text(&self) -> String {
        match self.rating {
            Some(r) => format!("{r:.1}"),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rating: Option<f64>) -> RawPlace {
        RawPlace {
            id: PlaceId::new("p1"),
            name: "Golden Gate".to_string(),
            coordinate: Coordinate::new(50.4488, 30.5135).unwrap(),
            rating,
            rating_count: Some(1200),
            address: "Volodymyrska St, 40A".to_string(),
            types: vec!["tourist_attraction".to_string()],
        }
    }

    #[test]
    fn category_comes_from_kind() {
        let place = Place::from_raw(raw(Some(4.7)), PlaceKind::Attractions);
        assert_eq!(place.category(), Category::Attraction);
        assert!(!place.is_food());

        let cafe = Place::from_raw(raw(None), PlaceKind::Cafes);
        assert_eq!(cafe.category(), Category::Food);
        assert!(cafe.is_food());
    }

    #[test]
    fn from_raw_copies_fields() {
        let place = Place::from_raw(raw(Some(4.7)), PlaceKind::Attractions);
        assert_eq!(place.id.as_str(), "p1");
        assert_eq!(place.rating_count, 1200);
        assert_eq!(place.vicinity, "Volodymyrska St, 40A");
        assert_eq!(place.label(), "Attractions");
    }

    #[test]
    fn missing_rating_is_zero_popularity() {
        assert_eq!(Place::from_raw(raw(None), PlaceKind::Parks).popularity(), 0.0);
        assert_eq!(
            Place::from_raw(raw(Some(f64::NAN)), PlaceKind::Parks).popularity(),
            0.0
        );
        assert_eq!(
            Place::from_raw(raw(Some(4.2)), PlaceKind::Parks).popularity(),
            4.2
        );
    }

    #[test]
    fn rating_text() {
        assert_eq!(Place::from_raw(raw(None), PlaceKind::Parks).rating_text(), "N/A");
        assert_eq!(
            Place::from_raw(raw(Some(4.26)), PlaceKind::Parks).rating_text(),
            "4.3"
        );
    }
}
