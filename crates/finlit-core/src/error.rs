use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinLitError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Invalid transition: {event} is not allowed while {phase}")]
    InvalidTransition { phase: String, event: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinLitError {
    /// Shorthand for the common "field must be positive" rejection.
    pub(crate) fn not_positive(field: &str) -> Self {
        FinLitError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be > 0"),
        }
    }

    /// A value that left the representable `Decimal` range.
    pub(crate) fn overflow(field: &str) -> Self {
        tracing::debug!(field, "decimal overflow");
        FinLitError::InvalidInput {
            field: field.into(),
            reason: format!("{field} is too large to compute"),
        }
    }
}

impl From<serde_json::Error> for FinLitError {
    fn from(e: serde_json::Error) -> Self {
        FinLitError::SerializationError(e.to_string())
    }
}
