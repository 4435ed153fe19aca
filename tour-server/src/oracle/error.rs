//! Travel-time oracle error types.

/// Errors from a travel-time backend.
///
/// These never reach the route planner: the [`TravelTimes`](super::TravelTimes)
/// adapter absorbs them into sentinel values.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered but refused the request (e.g. `REQUEST_DENIED`)
    #[error("request rejected with status {status}")]
    Rejected {
        status: String,
        message: Option<String>,
    },

    /// Response did not contain one element per destination
    #[error("expected {expected} matrix elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Rate limited by the API
    #[error("rate limited by travel-time API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OracleError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by travel-time API");

        let err = OracleError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = OracleError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected string");

        let err = OracleError::Rejected {
            status: "REQUEST_DENIED".into(),
            message: None,
        };
        assert_eq!(err.to_string(), "request rejected with status REQUEST_DENIED");

        let err = OracleError::ShapeMismatch {
            expected: 3,
            actual: 1,
        };
        assert_eq!(err.to_string(), "expected 3 matrix elements, got 1");
    }
}
