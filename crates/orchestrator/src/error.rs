use simpilot_protocol::{codes, CommandType};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = CommandError> = std::result::Result<T, E>;

/// Errors raised by a [`crate::SimulatorBackend`] operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Operation '{0}' is not supported by this backend")]
    Unsupported(&'static str),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A failure worth retrying (device busy, connection reset).
    #[error("{0}")]
    Transient(String),

    #[error("{0}")]
    Operation(String),
}

impl BackendError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Why a leaf command failed. Normalized into a failure result, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Validation failed")]
    ValidationFailed,

    #[error("Command timed out after {0} ms")]
    Timeout(u64),

    #[error("Unsupported command type: {0}")]
    UnsupportedCommand(CommandType),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("{0}")]
    Backend(String),
}

impl CommandError {
    pub(crate) fn from_backend(command: CommandType, err: BackendError) -> Self {
        match err {
            BackendError::Unsupported(_) => Self::UnsupportedCommand(command),
            BackendError::InvalidParameter { name, reason } => {
                Self::InvalidParameter { name, reason }
            }
            BackendError::Transient(message) | BackendError::Operation(message) => {
                Self::Backend(message)
            }
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed => codes::VALIDATION_FAILED,
            Self::Timeout(_) => codes::TIMEOUT,
            Self::UnsupportedCommand(_) => codes::UNSUPPORTED_COMMAND,
            Self::InvalidParameter { .. } => codes::INVALID_PARAMETER,
            Self::Backend(_) => codes::BACKEND_FAILURE,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}
