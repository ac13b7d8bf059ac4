//! Integration Tests for Failure Paths
//!
//! Covers the failure taxonomy end to end: launch failures always
//! surface, command failures are recorded or escalated depending on
//! break-on-error, and stderr lands on the error side only for failing
//! commands.

#![cfg(unix)]

use termsync::{Error, ExecutionOutcome, SessionState, Terminal};

#[tokio::test]
async fn test_nonzero_exit_records_status_without_throwing() {
    let mut terminal = Terminal::new();
    let result = terminal.execute("exit 3").await.unwrap();

    assert_eq!(result.status, 3);
    assert_eq!(result.outcome, ExecutionOutcome::CommandError);
    assert!(!result.is_success());
    assert_eq!(terminal.status(), 3);
    assert_eq!(
        terminal.state(),
        SessionState::Settled(ExecutionOutcome::CommandError)
    );
}

#[tokio::test]
async fn test_nonzero_exit_with_break_on_error_escalates() {
    let mut terminal = Terminal::new();
    terminal.set_break_on_error(true);

    match terminal.execute("exit 3").await {
        Err(Error::CommandFailed {
            command, status, ..
        }) => {
            assert_eq!(command, "exit 3");
            assert_eq!(status, 3);
        }
        other => panic!("expected CommandFailed, got {:?}", other.map(|r| r.outcome)),
    }
    assert_eq!(terminal.status(), 3);
}

#[tokio::test]
async fn test_failed_command_stderr_lands_on_error_side() {
    let mut terminal = Terminal::new();
    let result = terminal.execute("invalidCommand").await.unwrap();

    assert_ne!(result.status, 0);
    assert!(result.error.contains("invalidCommand"));
    assert!(result.error.contains("not found"));
    assert!(result.info.is_empty());

    assert!(terminal.console_error().contains("not found"));
    assert_eq!(terminal.console_info().len(), 0);
}

#[tokio::test]
async fn test_escalated_error_carries_captured_diagnostics() {
    let mut terminal = Terminal::new();
    terminal.set_break_on_error(true);

    match terminal.execute("invalidCommand").await {
        Err(Error::CommandFailed {
            working_dir,
            error_output,
            ..
        }) => {
            assert_eq!(working_dir, terminal.working_dir());
            assert!(error_output.contains("not found"));
        }
        other => panic!("expected CommandFailed, got {:?}", other.map(|r| r.outcome)),
    }
}

#[tokio::test]
async fn test_bad_working_directory_is_a_launch_failure() {
    let mut terminal = Terminal::new();
    terminal.set_working_dir("/definitely/not/a/real/dir");

    match terminal.execute("echo unreachable").await {
        Err(Error::LaunchFailed { command, .. }) => {
            assert_eq!(command, "echo unreachable");
        }
        other => panic!("expected LaunchFailed, got {:?}", other.map(|r| r.outcome)),
    }

    // No child process semantics applied
    assert!(terminal.console_info().is_empty());
    assert_eq!(terminal.status(), 0);
}

#[tokio::test]
async fn test_launch_failure_surfaces_even_without_break_on_error() {
    let mut terminal = Terminal::new();
    terminal
        .set_break_on_error(false)
        .set_working_dir("/definitely/not/a/real/dir");

    assert!(matches!(
        terminal.execute("true").await,
        Err(Error::LaunchFailed { .. })
    ));
}

#[tokio::test]
async fn test_failure_keeps_prior_output_accumulated() {
    let mut terminal = Terminal::new();
    terminal.execute("echo before").await.unwrap();
    terminal.execute("invalidCommand").await.unwrap();

    assert!(terminal.console_info().contains("before"));
    assert!(terminal.console_error().contains("not found"));
}

#[tokio::test]
async fn test_mixed_streams_on_failure_split_correctly() {
    let mut terminal = Terminal::new();
    let result = terminal
        .execute("echo progress; echo broken >&2; exit 7")
        .await
        .unwrap();

    assert_eq!(result.status, 7);
    assert!(result.info.contains("progress"));
    assert!(result.error.contains("broken"));
    assert!(terminal.console_info().contains("progress"));
    assert!(terminal.console_error().contains("broken"));
}
