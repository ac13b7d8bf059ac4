//! Error types and Result aliases for termsync

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for termsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for termsync
#[derive(Debug)]
pub enum Error {
    // === Launch errors ===
    /// Failed to spawn the child process (missing shell, bad working
    /// directory, permission denied). Always surfaced, never retried.
    LaunchFailed {
        command: String,
        working_dir: PathBuf,
        reason: String,
    },

    // === Command errors ===
    /// Child exited non-zero while break-on-error was enabled
    CommandFailed {
        command: String,
        working_dir: PathBuf,
        status: i32,
        error_output: String,
    },

    /// Configured timeout elapsed before the child exited while
    /// break-on-error was enabled
    CommandTimeout {
        command: String,
        working_dir: PathBuf,
        duration: Duration,
        error_output: String,
    },

    /// Empty command
    EmptyCommand,

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    // === Filesystem errors ===
    /// File exists but could not be read as text
    FileNotReadable {
        path: PathBuf,
        reason: String,
    },

    // === I/O and serialization errors (kept for compatibility) ===
    /// I/O errors
    Io(std::io::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Launch errors
            Error::LaunchFailed {
                command,
                working_dir,
                reason,
            } => {
                write!(
                    f,
                    "Failed to launch '{}' in '{}': {}",
                    command,
                    working_dir.display(),
                    reason
                )
            }

            // Command errors
            Error::CommandFailed {
                command,
                working_dir,
                status,
                error_output,
            } => {
                write!(
                    f,
                    "[{}] [{}] exited with status {}: {}",
                    working_dir.display(),
                    command,
                    status,
                    error_output
                )
            }
            Error::CommandTimeout {
                command,
                working_dir,
                duration,
                error_output,
            } => {
                write!(
                    f,
                    "[{}] [{}] timed out after {:?}: {}",
                    working_dir.display(),
                    command,
                    duration,
                    error_output
                )
            }
            Error::EmptyCommand => {
                write!(f, "Command cannot be empty")
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(
                    f,
                    "Failed to load config from '{}': {}",
                    path.display(),
                    reason
                )
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(
                    f,
                    "Configuration validation failed for '{}': {}",
                    field, reason
                )
            }

            // Filesystem errors
            Error::FileNotReadable { path, reason } => {
                write!(f, "Could not read file '{}': {}", path.display(), reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
