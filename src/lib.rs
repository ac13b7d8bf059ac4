//! termsync - Synchronous command execution with concurrent output capture
//!
//! This library runs external commands through the platform shell and
//! turns an inherently asynchronous subprocess into a blocking call with a
//! bounded wait: stdout and stderr are drained concurrently while the
//! session waits for the child to exit *and* for its output to settle.
//!
//! ## Features
//!
//! - **Settle-window drain detection:** output is complete once the child
//!   has exited and no new line has arrived for a configurable window
//! - **Concurrent capture:** one reader task per stream, so the child can
//!   never stall on a full pipe buffer
//! - **Failure escalation:** opt-in break-on-error turns non-zero exits
//!   and timeouts into errors carrying the captured diagnostics
//! - **Transcripts:** per-invocation and session-lifetime output buffers
//!   with synchronous line observers
//! - **Platform tables:** OS family and architecture classification,
//!   per-family shell launcher and kill command
//! - **Configuration:** TOML-based session defaults
//!
//! ## Module Organization
//!
//! - [`terminal`] - Process sessions, output buffers, stream readers
//! - [`platform`] - OS family and architecture classification
//! - [`models`] - Data structures (SessionResult, OutputLine)
//! - [`config`] - Session defaults loaded from TOML
//! - [`system`] - Kill-by-name and filesystem helpers
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use termsync::Terminal;
//!
//! # async fn run() -> termsync::Result<()> {
//! let mut terminal = Terminal::new();
//! terminal.set_break_on_error(true);
//!
//! let result = terminal.execute("echo hello").await?;
//! assert!(result.info.contains("hello"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! The caller's task suspends inside `execute` for the whole invocation.
//! Each invocation spawns exactly two reader tasks (stdout, stderr); the
//! per-invocation transcript is the only state they share with the
//! session, and its `append`/`count` discipline makes the settle poll safe
//! without further coordination. A timeout abandons the wait but does not
//! kill the child; [`system::kill_process_by_name`] is the separate
//! termination path.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod system;

// Core modules
pub mod terminal;
pub use terminal::{SessionState, Terminal};

// Platform modules
pub mod platform;

// Model modules
pub mod models;

// Re-exports for core functionality
pub use config::TerminalConfig;
pub use error::{Error, Result};
pub use models::{ExecutionOutcome, OutputLine, SessionResult};
pub use platform::{ArchFamily, OsFamily};

// Version information
/// The current version of termsync from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The crate description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
