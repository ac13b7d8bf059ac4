//! Session Result Model
//!
//! Represents the outcome of a single command invocation: the exit status,
//! its classification and the output captured while the command ran.
//! Results are derived at the end of each execution, they are not stored
//! by the session itself.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Classification of a finished invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExecutionOutcome {
    /// Child exited with status 0
    #[default]
    Clean,
    /// Child exited with a non-zero status
    CommandError,
    /// The configured timeout elapsed before the child exited
    TimedOut,
}

impl ExecutionOutcome {
    /// Whether the invocation finished successfully
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Clean)
    }

    /// Get a string representation of the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionOutcome::Clean => "clean",
            ExecutionOutcome::CommandError => "command-error",
            ExecutionOutcome::TimedOut => "timed-out",
        }
    }
}

/// The outcome of one `execute` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// Unique identifier for this invocation
    pub id: String,

    /// The command text that was executed
    pub command: String,

    /// Exit status reported by the child (0 when unavailable)
    pub status: i32,

    /// Final classification of the invocation
    pub outcome: ExecutionOutcome,

    /// Captured info output of this invocation, merge policy applied
    pub info: String,

    /// Captured error output of this invocation, merge policy applied
    pub error: String,

    /// Directory the command was executed in
    pub working_directory: PathBuf,

    /// When the invocation started (in local time)
    pub timestamp: DateTime<Local>,

    /// How long the invocation took, including the drain wait
    pub duration: Duration,
}

impl SessionResult {
    /// Create a result shell for a command about to run
    pub(crate) fn begin(command: &str, working_directory: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            command: command.to_string(),
            status: 0,
            outcome: ExecutionOutcome::Clean,
            info: String::new(),
            error: String::new(),
            working_directory,
            timestamp: Local::now(),
            duration: Duration::ZERO,
        }
    }

    /// Whether the invocation finished successfully
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}
