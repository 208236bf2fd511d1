//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Viewport or media dimensions are not strictly positive
    #[error("Invalid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: u32, height: u32 },

    /// Unit system string is neither "metric" nor "imperial"
    #[error("Invalid unit system: {0}")]
    InvalidUnitSystem(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
