//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur reading chain state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lock guarding the state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
