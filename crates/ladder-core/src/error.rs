//! Error types for ladder-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A caller-supplied value (position, bucket, half-spread) is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Price conversion error: {0}")]
    PriceConversion(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
