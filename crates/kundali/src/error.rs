use thiserror::Error;

use crate::ephemeris::EphemerisError;

/// Errors surfaced to callers of the chart, dasha and rectification APIs.
///
/// Unsupported varga divisors and exhausted dasha lookups are not errors;
/// they come back as `None`.
#[derive(Error, Debug)]
pub enum KundaliError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl KundaliError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        KundaliError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, KundaliError::InvalidInput { .. })
    }
}
