//! Error types for sensord
//!
//! All modules use `SensordResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sensord operations
pub type SensordResult<T> = Result<T, SensordError>;

/// All errors that can occur in sensord
#[derive(Error, Debug)]
pub enum SensordError {
    // Process execution errors
    #[error("executable not found: {0}")]
    CommandNotFound(String),

    #[error("command exited non-zero: {command}, exit code: {code}")]
    CommandExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("process terminated by signal")]
    ProcessSignaled,

    #[error("failed to spawn command: {command}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("cache: timeout error")]
    Timeout,

    #[error("producer task failed: {0}")]
    TaskFailed(String),

    // Sensor errors
    #[error("sensor output is not valid UTF-8")]
    OutputEncoding,

    // Configuration errors
    #[error("invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid listen address: {0}")]
    ListenAddrInvalid(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SensordError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a spawn failure error
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Check if error is a deadline overrun
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
