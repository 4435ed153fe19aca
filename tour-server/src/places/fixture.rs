//! Fixture place provider for running without API access.
//!
//! Loads recorded Nearby Search responses from JSON files and serves them
//! as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{Coordinate, RawPlace};

use super::PlaceProvider;
use super::client::DEFAULT_MAX_RESULTS;
use super::error::PlacesError;
use super::types::NearbySearchResponse;

/// Place provider that serves data from JSON files.
///
/// Location and radius are ignored: every query for a type returns the same
/// recorded places.
#[derive(Clone)]
pub struct FixturePlaces {
    /// Pre-loaded responses, keyed by place type.
    responses: Arc<HashMap<String, NearbySearchResponse>>,
    max_results: usize,
}

impl FixturePlaces {
    /// Create a new provider by loading JSON files from a directory.
    ///
    /// Expects files named `{place_type}.json` (e.g., `restaurant.json`,
    /// `park.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, PlacesError> {
        let responses = load_dir(data_dir.as_ref())?;

        Ok(Self {
            responses: Arc::new(responses),
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Set how many places each query keeps.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }
}

fn load_dir(data_dir: &Path) -> Result<HashMap<String, NearbySearchResponse>, PlacesError> {
    let fixture_error = |message: String| PlacesError::Fixture { message };
    let mut responses = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| {
        fixture_error(format!("Failed to read fixture directory {data_dir:?}: {e}"))
    })?;

    for entry in entries {
        let entry =
            entry.map_err(|e| fixture_error(format!("Failed to read directory entry: {e}")))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        // Place type from filename (e.g., "restaurant.json" -> "restaurant")
        let place_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| fixture_error(format!("Invalid filename: {path:?}")))?
            .to_string();

        let json = std::fs::read_to_string(&path)
            .map_err(|e| fixture_error(format!("Failed to read {path:?}: {e}")))?;

        let response: NearbySearchResponse = serde_json::from_str(&json)
            .map_err(|e| fixture_error(format!("Failed to parse {path:?}: {e}")))?;

        responses.insert(place_type, response);
    }

    if responses.is_empty() {
        return Err(fixture_error(format!(
            "No fixture files found in {data_dir:?}"
        )));
    }

    Ok(responses)
}

impl PlaceProvider for FixturePlaces {
    async fn nearby(
        &self,
        _center: Coordinate,
        _radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let response = self.responses.get(place_type).ok_or_else(|| PlacesError::Api {
            status: 404,
            message: format!("No fixture data for place type {place_type}"),
        })?;

        response.clone().into_places(self.max_results)
    }
}
