//! Error type for policy validation and settings (de)serialization.

use thiserror::Error;

/// Errors raised when mutating or loading a reconnection policy.
///
/// Every failure is reported synchronously to the caller doing the mutation
/// or load; the value being assigned is never partially applied.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A scalar assignment is below its lower bound.
    #[error("{field} out of range: {value}")]
    InvalidRange {
        /// Name of the rejected field (persisted key).
        field: &'static str,
        /// The rejected value, rendered for display.
        value: String,
    },

    /// A required reference was assigned an absent value.
    #[error("{field} must not be empty")]
    NullArgument { field: &'static str },

    /// A structurally required key is absent from the settings storage.
    #[error("missing required key `{key}`")]
    MissingField { key: String },

    /// A key is present but holds a different kind of value.
    #[error("key `{key}` holds a {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Persisted duration text could not be parsed.
    #[error("invalid duration `{0}`")]
    InvalidSpan(String),

    /// Persisted session range text could not be parsed.
    #[error("invalid session range `{0}`")]
    InvalidTimeRange(String),
}

impl PolicyError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PolicyError::InvalidRange { .. } => "invalid_range",
            PolicyError::NullArgument { .. } => "null_argument",
            PolicyError::MissingField { .. } => "missing_field",
            PolicyError::TypeMismatch { .. } => "type_mismatch",
            PolicyError::InvalidSpan(_) => "invalid_span",
            PolicyError::InvalidTimeRange(_) => "invalid_time_range",
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        PolicyError::MissingField {
            key: key.to_string(),
        }
    }
}
