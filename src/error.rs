use std::io;
use thiserror::Error;

/// Custom error type for the sysward engine
#[derive(Error, Debug)]
pub enum SyswardError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History store error: {0}")]
    History(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("System monitor error: {0}")]
    SystemMonitor(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the sysward engine
pub type Result<T> = std::result::Result<T, SyswardError>;

impl SyswardError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SyswardError::Config(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        SyswardError::PermissionDenied(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SyswardError::NotFound(msg.into())
    }

    pub fn system_monitor<S: Into<String>>(msg: S) -> Self {
        SyswardError::SystemMonitor(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        SyswardError::GpuNotAvailable(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SyswardError::Other(msg.into())
    }

    /// True for failures of the history store, which must never be swallowed
    pub fn is_fatal_io(&self) -> bool {
        matches!(self, SyswardError::History(_))
    }
}
