//! # Error Types
//!
//! Structured error types for line_core. Field-level form problems are not
//! errors: they live in the validation [`ErrorMap`](crate::validation::ErrorMap),
//! and insufficient upstream data is modelled as `Option::None` in the derived
//! outputs. `ConfigError` covers the cases where an operation itself fails:
//! bad arguments to an API call, a rejected submission, a transport failure.
//!
//! ## Example
//!
//! ```rust
//! use line_core::errors::{ConfigError, ConfigResult};
//!
//! fn validate_distance(distance_m: f64) -> ConfigResult<()> {
//!     if distance_m <= 0.0 {
//!         return Err(ConfigError::invalid_input(
//!             "total_distance",
//!             distance_m.to_string(),
//!             "Distance must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for line_core operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Structured error type for configurator operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by the presentation layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A mail submission was attempted while another is still pending
    #[error("Submission already in flight")]
    SubmissionInFlight,

    /// The mail relay rejected or failed to deliver a submission
    #[error("Transport error: {reason}")]
    TransportError { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl ConfigError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        ConfigError::MissingField {
            field: field.into(),
        }
    }

    /// Create a TransportError
    pub fn transport(reason: impl Into<String>) -> Self {
        ConfigError::TransportError {
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        ConfigError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConfigError::SubmissionInFlight | ConfigError::TransportError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidInput { .. } => "INVALID_INPUT",
            ConfigError::MissingField { .. } => "MISSING_FIELD",
            ConfigError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ConfigError::TransportError { .. } => "TRANSPORT_ERROR",
            ConfigError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ConfigError::invalid_input("voltage", "-380", "Voltage must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: ConfigError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ConfigError::missing_field("email").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            ConfigError::SubmissionInFlight.error_code(),
            "SUBMISSION_IN_FLIGHT"
        );
        assert_eq!(
            ConfigError::serialization("bad json").error_code(),
            "SERIALIZATION_ERROR"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(ConfigError::SubmissionInFlight.is_recoverable());
        assert!(!ConfigError::missing_field("name").is_recoverable());
    }
}
