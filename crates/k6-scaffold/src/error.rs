//! Error types for k6-scaffold

use thiserror::Error;

/// Result type alias using k6-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Required external tool missing from PATH
    #[error("missing prerequisite: {command}")]
    MissingPrerequisite { command: String },

    /// Required flag absent in non-interactive mode
    #[error("missing required flag: {flag}")]
    MissingFlag { flag: String },

    /// Required positional argument absent in non-interactive mode
    #[error("missing argument: {name}")]
    MissingArgument { name: String },

    /// External command exited with a non-zero status. The combined
    /// stdout/stderr is carried for diagnostic display.
    #[error("command failed: {program}")]
    CommandFailed { program: String, output: String },

    /// External command could not be spawned
    #[error("required command not found: {command}")]
    CommandNotFound { command: String },

    /// Path is not valid UTF-8
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Create a missing prerequisite error
    pub fn missing_prerequisite(command: impl Into<String>) -> Self {
        Self::MissingPrerequisite {
            command: command.into(),
        }
    }

    /// Create a missing flag error
    pub fn missing_flag(flag: impl Into<String>) -> Self {
        Self::MissingFlag { flag: flag.into() }
    }

    /// Create a missing argument error
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    /// Create a command failed error
    pub fn command_failed(program: impl Into<String>, output: impl Into<String>) -> Self {
        Self::CommandFailed {
            program: program.into(),
            output: output.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
