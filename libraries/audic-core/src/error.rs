//! Error types for Audic

use thiserror::Error;

/// Result type alias using `AudicError`
pub type Result<T> = std::result::Result<T, AudicError>;

/// Errors surfaced by a player object
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudicError {
    /// Bad constructor or setter input (type or range violation)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing player failed to start, failed a command or failed a sample fetch
    #[error("Backing player failure: {0}")]
    BackingPlayer(String),

    /// The player was destroyed; no further commands are accepted
    #[error("Player has been destroyed")]
    Destroyed,
}

impl AudicError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a backing player error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::BackingPlayer(msg.into())
    }

    /// Check if this error came from argument validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
