//! Error types for assessment scoring
//!
//! The scoring core has exactly two failure modes, both raised while
//! normalizing input. Nothing downstream of a valid `AssessmentInput` fails.

use thiserror::Error;

/// Input validation failure raised before any score is computed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// A categorical field carries a value outside its enumerated set
    #[error("Malformed input: {field} has unsupported value '{value}'")]
    MalformedInput { field: &'static str, value: String },

    /// A required field is absent or blank
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

impl ScoringError {
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedInput {
            field,
            value: value.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField { field }
    }

    /// Name of the offending field in camelCase wire form
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedInput { field, .. } => field,
            Self::MissingRequiredField { field } => field,
        }
    }
}
