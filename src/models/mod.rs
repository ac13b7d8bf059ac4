//! Core data models for termsync
//!
//! This module contains the data structures that represent the domain
//! entities of the crate: captured output units, invocation outcomes
//! and per-invocation results.

pub mod output_line;
pub mod session_result;

// Re-exports for convenience
pub use output_line::OutputLine;
pub use session_result::{ExecutionOutcome, SessionResult};
