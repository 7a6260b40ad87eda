//! Error types for settings loading and command dispatch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors that can occur while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A strictly validated key carried a value that could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The settings file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Error reported by a host surface (window, tray, label).
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
}

impl SurfaceError {
    /// Creates a surface error for the given operation.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Errors that can occur while dispatching a command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Loading the settings file failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The host surface rejected an operation.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl ShellError {
    /// Returns `true` if the process should terminate after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
