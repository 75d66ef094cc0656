use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by conversation construction, message parsing and the
/// remote chat-completion call.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed construction arguments or message input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing credential or unusable client settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the remote service, passed through as-is.
    #[error("remote service error: {0}")]
    RemoteService(#[source] Box<dyn StdError + Send + Sync>),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChatError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ChatError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        ChatError::Configuration(msg.into())
    }
}
