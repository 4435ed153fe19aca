//! Domain error types.
//!
//! These errors represent validation failures when turning user or provider
//! input into domain values. They are distinct from API/IO errors.

use super::InvalidCoordinate;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside the valid lat/lng range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Mood string not recognised
    #[error("unknown mood: {0} (expected \"hungry\" or \"adventurous\")")]
    UnknownMood(String),

    /// Place kind key not in the catalog
    #[error("unknown place kind: {0}")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn error_display() {
        let err = DomainError::UnknownMood("sleepy".into());
        assert_eq!(
            err.to_string(),
            "unknown mood: sleepy (expected \"hungry\" or \"adventurous\")"
        );

        let err = DomainError::UnknownKind("zoos".into());
        assert_eq!(err.to_string(), "unknown place kind: zoos");

        let err: DomainError = Coordinate::new(0.0, 200.0).unwrap_err().into();
        assert!(err.to_string().contains("longitude"));
    }
}
