//! Error types for lobber-script

use thiserror::Error;

/// Data loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error(transparent)]
    Core(#[from] lobber_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
