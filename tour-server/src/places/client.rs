//! Google Places "Nearby Search" client.

use tracing::debug;

use crate::domain::{Coordinate, RawPlace};

use super::PlaceProvider;
use super::error::PlacesError;
use super::types::NearbySearchResponse;

/// Default base URL for the Google Maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default number of places kept per query.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Configuration for the Places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Places kept per nearby query
    pub max_results: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set how many places each query keeps.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }
}

/// Client for the Places API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: usize,
}

impl PlacesClient {
    /// Create a new Places API client.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            max_results: config.max_results,
        })
    }
}

impl PlaceProvider for PlacesClient {
    async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let url = format!("{}/maps/api/place/nearbysearch/json", self.base_url);

        debug!(%center, radius_m, place_type, "searching nearby places");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("location", center.to_string()),
                ("radius", radius_m.to_string()),
                ("type", place_type.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: NearbySearchResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Json {
                message: e.to_string(),
            })?;

        response.into_places(self.max_results)
    }
}
