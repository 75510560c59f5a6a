//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ladder error: {0}")]
    Ladder(#[from] ladder_core::CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] ladder_telemetry::TelemetryError),

    #[error("Frame encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
