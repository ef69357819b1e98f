//! Infrastructure error bridge
//!
//! Wraps transport-level failures so the rest of the workspace only ever
//! sees [`SockwatchError`]. Decode failures reported by reqwest keep their
//! own category; everything else at this layer is a network problem.

use sockwatch_domain::SockwatchError;
use thiserror::Error;

/// Errors raised by infrastructure adapters before domain mapping
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfraError> for SockwatchError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Transport(err) if err.is_decode() => Self::Decode(err.to_string()),
            InfraError::Transport(err) => Self::Network(err.to_string()),
            InfraError::Io(err) => Self::Internal(err.to_string()),
        }
    }
}
