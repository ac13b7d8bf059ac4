//! Output Line Model
//!
//! Represents a single captured line of child-process output. Lines are
//! already decoded when they reach a buffer; the model only records the
//! text together with its arrival order and time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single line of captured output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLine {
    /// The text content, without its line terminator
    pub text: String,

    /// Position in the stream (0-based arrival index)
    pub line_number: usize,

    /// When this line was received
    pub timestamp: DateTime<Utc>,
}

impl OutputLine {
    /// Create a new output line
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        Self {
            text: text.into(),
            line_number,
            timestamp: Utc::now(),
        }
    }

    /// Length of the text content in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for OutputLine {
    fn default() -> Self {
        Self::new(String::new(), 0)
    }
}

impl From<String> for OutputLine {
    fn from(text: String) -> Self {
        Self::new(text, 0)
    }
}

impl From<&str> for OutputLine {
    fn from(text: &str) -> Self {
        Self::new(text.to_string(), 0)
    }
}
