//! Error types used throughout the application

use thiserror::Error;

/// Main error type for sockwatch
#[derive(Error, Debug)]
pub enum SockwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for sockwatch operations
pub type Result<T> = std::result::Result<T, SockwatchError>;
