//! Integration Tests for Timeout Behavior
//!
//! A configured timeout bounds the wait for child exit only: shorter than
//! the command's runtime it yields a `TimedOut` classification (escalated
//! when break-on-error is set), longer than the runtime it never fires.

#![cfg(unix)]

use std::time::{Duration, Instant};

use termsync::{Error, ExecutionOutcome, SessionState, Terminal};

#[tokio::test]
async fn test_timeout_shorter_than_runtime_classifies_timed_out() {
    let mut terminal = Terminal::new();
    terminal.set_timeout(Some(Duration::from_millis(100)));

    let started = Instant::now();
    let result = terminal.execute("sleep 5").await.unwrap();

    assert_eq!(result.outcome, ExecutionOutcome::TimedOut);
    assert!(!result.is_success());
    assert_eq!(
        terminal.state(),
        SessionState::Settled(ExecutionOutcome::TimedOut)
    );
    assert!(
        started.elapsed() < Duration::from_secs(4),
        "the wait must stop at the timeout, not the child's runtime"
    );
}

#[tokio::test]
async fn test_timeout_with_break_on_error_escalates() {
    let mut terminal = Terminal::new();
    terminal
        .set_timeout(Some(Duration::from_millis(100)))
        .set_break_on_error(true);

    match terminal.execute("sleep 5").await {
        Err(Error::CommandTimeout {
            command, duration, ..
        }) => {
            assert_eq!(command, "sleep 5");
            assert_eq!(duration, Duration::from_millis(100));
        }
        other => panic!("expected CommandTimeout, got {:?}", other.map(|r| r.outcome)),
    }
}

#[tokio::test]
async fn test_timeout_longer_than_runtime_never_fires() {
    let mut terminal = Terminal::new();
    terminal.set_timeout(Some(Duration::from_secs(30)));

    let result = terminal.execute("echo fast").await.unwrap();

    assert_eq!(result.outcome, ExecutionOutcome::Clean);
    assert_eq!(result.status, 0);
    assert!(result.info.contains("fast"));
}

#[tokio::test]
async fn test_timeout_preserves_output_captured_so_far() {
    let mut terminal = Terminal::new();
    terminal.set_timeout(Some(Duration::from_millis(500)));

    let result = terminal
        .execute("echo early; echo painful >&2; sleep 5")
        .await
        .unwrap();

    assert_eq!(result.outcome, ExecutionOutcome::TimedOut);
    assert!(result.info.contains("early"));
    assert!(result.error.contains("painful"));
    assert!(terminal.console_info().contains("early"));
    assert!(terminal.console_error().contains("painful"));
}

#[tokio::test]
async fn test_timed_out_child_is_not_killed() {
    let mut terminal = Terminal::new();
    terminal.set_timeout(Some(Duration::from_millis(100)));
    terminal.execute("sleep 2").await.unwrap();

    // The handle survives the invocation and still points at a live child
    let child = terminal.process().expect("child handle should be retained");
    assert!(child.id().is_some(), "child should still be running");
}

#[tokio::test]
async fn test_no_timeout_waits_for_slow_commands() {
    let mut terminal = Terminal::new();
    assert!(terminal.timeout().is_none());

    let result = terminal.execute("sleep 0.3; echo done").await.unwrap();

    assert_eq!(result.outcome, ExecutionOutcome::Clean);
    assert!(result.info.contains("done"));
}

#[tokio::test]
async fn test_session_is_reusable_after_timeout() {
    let mut terminal = Terminal::new();
    terminal.set_timeout(Some(Duration::from_millis(100)));
    terminal.execute("sleep 2").await.unwrap();

    terminal.set_timeout(None);
    let result = terminal.execute("echo recovered").await.unwrap();

    assert_eq!(result.outcome, ExecutionOutcome::Clean);
    assert!(terminal.console_info().contains("recovered"));
}
