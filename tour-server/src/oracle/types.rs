//! Distance Matrix API wire types.
//!
//! Only the fields the planner reads are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

use crate::domain::LegEstimate;

use super::error::OracleError;

/// Top-level Distance Matrix response.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Request-level status, `OK` on success.
    pub status: String,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    pub error_message: Option<String>,
}

/// One row per origin.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// One element per destination.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    /// Element-level status, e.g. `OK`, `NOT_FOUND`, `ZERO_RESULTS`.
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// A measured quantity with its display text.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

impl MatrixElement {
    /// The leg estimate, if this element succeeded.
    pub fn to_estimate(&self) -> Option<LegEstimate> {
        if self.status != "OK" {
            return None;
        }
        let distance = self.distance.as_ref()?;
        let duration = self.duration.as_ref()?;
        Some(LegEstimate::new(
            distance.value,
            distance.text.clone(),
            duration.value,
            duration.text.clone(),
        ))
    }
}

impl DistanceMatrixResponse {
    /// Per-destination estimates for the single origin of the request.
    ///
    /// Fails unless the request-level status is `OK` and the first row has
    /// exactly `expected` elements.
    pub fn into_estimates(self, expected: usize) -> Result<Vec<Option<LegEstimate>>, OracleError> {
        if self.status != "OK" {
            return Err(OracleError::Rejected {
                status: self.status,
                message: self.error_message,
            });
        }

        let row = self.rows.into_iter().next().map(|r| r.elements).unwrap_or_default();
        if row.len() != expected {
            return Err(OracleError::ShapeMismatch {
                expected,
                actual: row.len(),
            });
        }

        Ok(row.iter().map(MatrixElement::to_estimate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "destination_addresses": ["Khreshchatyk St, Kyiv", "Nowhere"],
        "origin_addresses": ["Maidan Nezalezhnosti, Kyiv"],
        "rows": [{
            "elements": [
                {
                    "distance": {"text": "1.2 km", "value": 1204},
                    "duration": {"text": "15 mins", "value": 912},
                    "status": "OK"
                },
                {"status": "ZERO_RESULTS"}
            ]
        }],
        "status": "OK"
    }"#;

    #[test]
    fn parse_sample_response() {
        let response: DistanceMatrixResponse = serde_json::from_str(SAMPLE).unwrap();
        let estimates = response.into_estimates(2).unwrap();

        assert_eq!(
            estimates[0],
            Some(LegEstimate::new(1204, "1.2 km", 912, "15 mins"))
        );
        assert_eq!(estimates[1], None);
    }

    #[test]
    fn rejected_status() {
        let json = r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "rows": []}"#;
        let response: DistanceMatrixResponse = serde_json::from_str(json).unwrap();

        match response.into_estimates(1) {
            Err(OracleError::Rejected { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn element_count_must_match() {
        let response: DistanceMatrixResponse = serde_json::from_str(SAMPLE).unwrap();
        assert!(matches!(
            response.into_estimates(3),
            Err(OracleError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn ok_element_without_distance_is_failed() {
        let element = MatrixElement {
            status: "OK".to_string(),
            distance: None,
            duration: Some(TextValue {
                text: "1 min".to_string(),
                value: 60,
            }),
        };
        assert_eq!(element.to_estimate(), None);
    }
}
