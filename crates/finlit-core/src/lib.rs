pub(crate) mod checked;
pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "budget")]
pub mod budget;

#[cfg(feature = "games")]
pub mod games;

pub use config::EngineConfig;
pub use error::FinLitError;
pub use types::*;

/// Standard result type for all finlit operations
pub type FinLitResult<T> = Result<T, FinLitError>;

/// Reject zero, negative and missing numeric inputs.
pub(crate) fn require_positive(field: &str, value: rust_decimal::Decimal) -> FinLitResult<()> {
    if value <= rust_decimal::Decimal::ZERO {
        tracing::debug!(field, %value, "rejecting non-positive input");
        return Err(FinLitError::not_positive(field));
    }
    Ok(())
}
