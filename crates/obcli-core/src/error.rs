//! Error type for the core crate.

use thiserror::Error;

/// Errors raised by config validation and JSON handling.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
