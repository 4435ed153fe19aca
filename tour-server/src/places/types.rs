//! Places API "Nearby Search" wire types.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinate, PlaceId, RawPlace};

use super::error::PlacesError;

/// Top-level Nearby Search response.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
    pub error_message: Option<String>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyResult {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub vicinity: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl NearbyResult {
    /// Convert to a provider-neutral record. Returns `None` if the reported
    /// location is not a valid coordinate.
    pub fn into_raw_place(self) -> Option<RawPlace> {
        let LatLng { lat, lng } = self.geometry.location;
        let coordinate = match Coordinate::new(lat, lng) {
            Ok(c) => c,
            Err(e) => {
                debug!(place_id = %self.place_id, error = %e, "skipping place with bad location");
                return None;
            }
        };

        Some(RawPlace {
            id: PlaceId::new(self.place_id),
            name: self.name,
            coordinate,
            rating: self.rating,
            rating_count: self.user_ratings_total,
            address: self.vicinity.unwrap_or_default(),
            types: self.types,
        })
    }
}

impl NearbySearchResponse {
    /// The first `limit` valid places, in provider order.
    ///
    /// `ZERO_RESULTS` is a successful empty answer; any other status besides
    /// `OK` is an error.
    pub fn into_places(self, limit: usize) -> Result<Vec<RawPlace>, PlacesError> {
        match self.status.as_str() {
            "OK" => Ok(self
                .results
                .into_iter()
                .filter_map(NearbyResult::into_raw_place)
                .take(limit)
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::Rejected {
                status: self.status,
                message: self.error_message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "html_attributions": [],
        "results": [
            {
                "place_id": "ChIJ1",
                "name": "Puzata Khata",
                "geometry": {"location": {"lat": 50.4470, "lng": 30.5220}},
                "rating": 4.4,
                "user_ratings_total": 8123,
                "vicinity": "Baseina St, 1/2",
                "types": ["restaurant", "food"]
            },
            {
                "place_id": "ChIJ2",
                "name": "Broken",
                "geometry": {"location": {"lat": 123.0, "lng": 30.5}}
            },
            {
                "place_id": "ChIJ3",
                "name": "Lviv Croissants",
                "geometry": {"location": {"lat": 50.4480, "lng": 30.5190}}
            }
        ],
        "status": "OK"
    }"#;

    #[test]
    fn parse_sample() {
        let response: NearbySearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let places = response.into_places(10).unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id.as_str(), "ChIJ1");
        assert_eq!(places[0].rating, Some(4.4));
        assert_eq!(places[0].rating_count, Some(8123));
        assert_eq!(places[0].address, "Baseina St, 1/2");

        assert_eq!(places[1].name, "Lviv Croissants");
        assert_eq!(places[1].rating, None);
        assert_eq!(places[1].address, "");
        assert!(places[1].types.is_empty());
    }

    #[test]
    fn limit_applies_after_filtering() {
        let response: NearbySearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let places = response.into_places(1).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id.as_str(), "ChIJ1");
    }

    #[test]
    fn zero_results_is_empty() {
        let json = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let response: NearbySearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_places(3).unwrap().is_empty());
    }

    #[test]
    fn denied_is_error() {
        let json = r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "bad key"}"#;
        let response: NearbySearchResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response.into_places(3),
            Err(PlacesError::Rejected { .. })
        ));
    }
}
