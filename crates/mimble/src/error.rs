//! Error types for the validator facade.

use mimble_core::ValidationError;
use thiserror::Error;

/// Errors that can occur outside a validation verdict, such as loading
/// configuration.
#[derive(Debug, Error)]
pub enum MimbleError {
    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration parsed but is not usable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid JSON for [`ValidatorConfig`](crate::ValidatorConfig).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, MimbleError>;
