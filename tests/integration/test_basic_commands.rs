//! Integration Tests for Basic Command Execution
//!
//! End-to-end coverage of the happy path: spawning real shell commands,
//! capturing their output in order, and accumulating transcripts across
//! invocations. Unix-only since the commands run through `sh -c`.

#![cfg(unix)]

use std::sync::{Arc, Mutex};

use termsync::{ExecutionOutcome, SessionState, Terminal};

#[tokio::test]
async fn test_echo_captures_info_and_status() {
    let mut terminal = Terminal::new();
    let result = terminal.execute("echo Howdy").await.unwrap();

    assert_eq!(result.status, 0);
    assert_eq!(result.outcome, ExecutionOutcome::Clean);
    assert!(result.is_success());
    assert!(result.info.contains("Howdy"));
    assert!(result.error.is_empty());

    assert_eq!(terminal.status(), 0);
    assert!(terminal.console_info().contains("Howdy"));
    assert!(terminal.console_error().is_empty());
    assert!(terminal.process().is_some());
    assert_eq!(
        terminal.state(),
        SessionState::Settled(ExecutionOutcome::Clean)
    );
}

#[tokio::test]
async fn test_multi_line_output_preserves_emission_order() {
    let mut terminal = Terminal::new();
    terminal
        .execute("printf 'one\\ntwo\\nthree\\n'")
        .await
        .unwrap();

    assert_eq!(
        terminal.info_lines(),
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    );
    assert!(terminal.error_lines().is_empty());
    assert_eq!(terminal.message_count(), 3);
}

#[tokio::test]
async fn test_sequential_executes_accumulate_in_call_order() {
    let mut terminal = Terminal::new();
    terminal.execute("echo Sub").await.unwrap();
    terminal.execute("echo ject").await.unwrap();

    let console = terminal.console_info();
    assert!(console.contains("Sub"));
    assert!(console.contains("ject"));

    let sub_at = console.find("Sub").unwrap();
    let ject_at = console.rfind("ject").unwrap();
    assert!(sub_at < ject_at, "first call's output must come first");
    assert_eq!(terminal.message_count(), 2);
}

#[tokio::test]
async fn test_clear_console_empties_both_transcripts() {
    let mut terminal = Terminal::new();
    terminal.execute("echo Howdy").await.unwrap();
    terminal.execute("ls /definitely-not-here").await.unwrap();
    assert!(terminal.console_info().contains("Howdy"));
    assert!(!terminal.console_error().is_empty());

    terminal.clear_console();
    assert_eq!(terminal.console_info().len(), 0);
    assert_eq!(terminal.console_error().len(), 0);
    assert_eq!(terminal.message_count(), 0);
}

#[tokio::test]
async fn test_stderr_on_clean_exit_folds_into_info() {
    let mut terminal = Terminal::new();
    let result = terminal
        .execute("echo diagnostic >&2; exit 0")
        .await
        .unwrap();

    assert_eq!(result.status, 0);
    assert!(result.info.contains("diagnostic"));
    assert!(result.error.is_empty());
    assert!(terminal.console_info().contains("diagnostic"));
    assert!(terminal.console_error().is_empty());
}

#[tokio::test]
async fn test_working_directory_applies_to_child() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();

    let mut terminal = Terminal::new();
    terminal.set_working_dir(&canonical);
    let result = terminal.execute("pwd").await.unwrap();

    assert_eq!(result.info.trim(), canonical.to_string_lossy());
}

#[tokio::test]
async fn test_explicit_env_reaches_child() {
    let mut terminal = Terminal::new();
    terminal.set_env("TERMSYNC_MARKER", "present");
    let result = terminal.execute("echo $TERMSYNC_MARKER").await.unwrap();

    assert!(result.info.contains("present"));
}

#[tokio::test]
async fn test_disabled_inheritance_hides_parent_env() {
    // HOME is always present in the inherited snapshot, never in an
    // isolated one
    let mut terminal = Terminal::new();
    terminal.set_inherit_env(false);
    let result = terminal.execute("echo [$HOME]").await.unwrap();

    assert!(result.info.contains("[]"));
}

#[tokio::test]
async fn test_stream_observers_see_lines_live() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut terminal = Terminal::new();
    terminal.on_info_line(move |line| {
        sink.lock().unwrap().push(line.to_string());
    });
    terminal.execute("printf 'a\\nb\\n'").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_merged_observers_fire_at_merge_time() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut terminal = Terminal::new();
    terminal.on_merged_info(move |line| {
        sink.lock().unwrap().push(line.to_string());
    });
    terminal.execute("echo merged").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["merged".to_string()]);
}

#[tokio::test]
async fn test_clone_config_does_not_carry_transcript() {
    let mut original = Terminal::new();
    original.set_settle_window(std::time::Duration::from_millis(64));
    original.execute("echo Howdy").await.unwrap();

    let clone = original.clone_config();
    assert_eq!(clone.settle_window(), original.settle_window());
    assert_eq!(clone.status(), original.status());
    assert_eq!(clone.working_dir(), original.working_dir());
    assert_ne!(
        original.console_info().len(),
        clone.console_info().len(),
        "clone must start with an empty transcript"
    );
}

#[tokio::test]
async fn test_per_call_settle_window_override() {
    let mut terminal = Terminal::new();
    let result = terminal
        .execute_settled("echo quick", std::time::Duration::from_millis(32))
        .await
        .unwrap();

    assert!(result.info.contains("quick"));
    assert_eq!(result.outcome, ExecutionOutcome::Clean);
}
