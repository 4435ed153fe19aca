//! Google Distance Matrix HTTP client.
//!
//! Provides walking-time estimates from one origin to many destinations.
//! Handles authentication, request concurrency and response validation.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, LegEstimate};

use super::TravelTimeOracle;
use super::error::OracleError;
use super::types::DistanceMatrixResponse;

/// Default base URL for the Google Maps web services.
pub(crate) const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// The API accepts at most this many destinations per request.
const MAX_DESTINATIONS: usize = 25;

/// Configuration for the Distance Matrix client.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production Google Maps)
    pub base_url: String,
    /// Travel mode; the planner always walks
    pub mode: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: "walking".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance Matrix API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct DistanceMatrixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    mode: String,
    semaphore: Arc<Semaphore>,
}

impl DistanceMatrixClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            mode: config.mode,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Query one chunk of at most `MAX_DESTINATIONS` destinations.
    async fn query_chunk(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OracleError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/maps/api/distancematrix/json", self.base_url);
        let destinations_param = destinations
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join("|");

        debug!(%origin, count = destinations.len(), "querying distance matrix");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origins", origin.to_string()),
                ("destinations", destinations_param),
                ("mode", self.mode.clone()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OracleError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let matrix: DistanceMatrixResponse =
            serde_json::from_str(&body).map_err(|e| OracleError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        matrix.into_estimates(destinations.len())
    }
}

impl TravelTimeOracle for DistanceMatrixClient {
    async fn walking_matrix(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        let mut estimates = Vec::with_capacity(destinations.len());
        for chunk in destinations.chunks(MAX_DESTINATIONS) {
            estimates.extend(self.query_chunk(origin, chunk).await?);
        }
        Ok(estimates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OracleConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = OracleConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mode, "walking");
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let config = OracleConfig::new("test-key").with_base_url("http://localhost:8080/");
        let client = DistanceMatrixClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn empty_destinations_issue_no_request() {
        // Unroutable base URL: any request would fail.
        let config = OracleConfig::new("test-key").with_base_url("http://127.0.0.1:9");
        let client = DistanceMatrixClient::new(config).unwrap();
        let origin = Coordinate::new(50.45, 30.52).unwrap();

        let estimates = client.walking_matrix(origin, &[]).await.unwrap();
        assert!(estimates.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let config = OracleConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = DistanceMatrixClient::new(config).unwrap();
        let origin = Coordinate::new(50.45, 30.52).unwrap();

        let result = client.walking_matrix(origin, &[origin]).await;
        assert!(matches!(result, Err(OracleError::Http(_))));
    }
}
