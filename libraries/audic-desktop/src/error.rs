/// Native player errors
use audic_core::AudicError;
use thiserror::Error;

/// Result type for native player operations
pub type Result<T> = std::result::Result<T, DesktopError>;

/// Errors from the VLC backend and player configuration
#[derive(Debug, Error)]
pub enum DesktopError {
    /// Failed to spawn the VLC process
    #[error("Failed to launch VLC: {0}")]
    Launch(String),

    /// VLC exited before its HTTP interface came up
    #[error("VLC exited during startup ({0})")]
    ExitedDuringStartup(String),

    /// HTTP interface never answered
    #[error("VLC HTTP interface not reachable after {attempts} attempts")]
    StartupTimedOut { attempts: u32 },

    /// VLC answered with an error status
    #[error("VLC returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DesktopError> for AudicError {
    fn from(err: DesktopError) -> Self {
        AudicError::backend(err.to_string())
    }
}
