//! Process Session
//!
//! The `Terminal` owns one OS process invocation at a time: it spawns the
//! command through the platform shell, drains stdout and stderr
//! concurrently into a per-invocation transcript, and blocks the caller
//! until both the child has exited and its output has settled. The settle
//! window exists because process exit and pipe drain are not atomic; a
//! child can exit before its buffered output reaches the reading side, and
//! waiting on output alone could hang on a silent child. Completion is the
//! conjunction of both conditions.

pub mod buffer;
pub mod reader;

pub use buffer::{Console, LineObserver, OutputBuffer, StreamKind};
pub use reader::spawn_line_reader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::time;

use crate::config::TerminalConfig;
use crate::error::{Error, Result};
use crate::models::{ExecutionOutcome, SessionResult};
use crate::platform::OsFamily;

/// Cadence of the settle-detection poll
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Default settle window applied when none is configured
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(128);

/// Lifecycle of a session across one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No invocation in flight
    Idle,
    /// Child spawned, streams draining
    Running,
    /// Child exited, waiting for output to settle
    Draining,
    /// Invocation finished with the given classification
    Settled(ExecutionOutcome),
}

/// A synchronous command-execution session over an asynchronous child
/// process.
///
/// One invocation is in flight at a time; `execute` takes `&mut self`, so
/// a second caller queues at the borrow rather than racing on the
/// transient transcript.
pub struct Terminal {
    working_dir: PathBuf,
    inherit_env: bool,
    env_vars: HashMap<String, String>,
    timeout: Option<Duration>,
    settle_window: Duration,
    break_on_error: bool,
    os: OsFamily,
    child: Option<Child>,
    last_status: i32,
    state: SessionState,
    /// Per-invocation transcript, shared with the two reader tasks
    transient: Arc<Console>,
    /// Session-lifetime transcript, owned by the caller's side
    cumulative: Console,
}

impl Terminal {
    /// Create a session with default settings: current working directory,
    /// inherited environment, no timeout, default settle window,
    /// break-on-error disabled.
    pub fn new() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            inherit_env: true,
            env_vars: HashMap::new(),
            timeout: None,
            settle_window: DEFAULT_SETTLE_WINDOW,
            break_on_error: false,
            os: OsFamily::current(),
            child: None,
            last_status: 0,
            state: SessionState::Idle,
            transient: Arc::new(Console::new()),
            cumulative: Console::new(),
        }
    }

    /// Create a session from a loaded configuration
    pub fn with_config(config: &TerminalConfig) -> Self {
        let mut terminal = Self::new();
        terminal
            .set_timeout(config.timeout_ms.map(Duration::from_millis))
            .set_settle_window(Duration::from_millis(config.settle_window_ms))
            .set_break_on_error(config.break_on_error)
            .set_inherit_env(config.inherit_env);
        if let Some(dir) = &config.working_dir {
            terminal.set_working_dir(dir.clone());
        }
        terminal
    }

    /// Fresh session copying only configuration (working directory,
    /// environment settings, timeout, settle window, break-on-error, last
    /// status). Accumulated output, observers and the child handle do not
    /// carry over.
    pub fn clone_config(&self) -> Self {
        let mut copy = Self::new();
        copy.working_dir = self.working_dir.clone();
        copy.inherit_env = self.inherit_env;
        copy.env_vars = self.env_vars.clone();
        copy.timeout = self.timeout;
        copy.settle_window = self.settle_window;
        copy.break_on_error = self.break_on_error;
        copy.last_status = self.last_status;
        copy
    }

    // === Invocation surface ===

    /// Execute a command through the platform shell and block until its
    /// output has settled. See [`Terminal::execute_settled`].
    pub async fn execute(&mut self, command: &str) -> Result<SessionResult> {
        self.execute_settled(command, self.settle_window).await
    }

    /// Execute a command with a one-off settle window.
    ///
    /// The call returns once the child has exited (bounded by the
    /// configured timeout, if any) and the invocation transcript has been
    /// quiet for `settle_window`. Launch failures are always surfaced.
    /// Command failures and timeouts are surfaced only when break-on-error
    /// is enabled; otherwise they are recorded on the session and in the
    /// returned result.
    pub async fn execute_settled(
        &mut self,
        command: &str,
        settle_window: Duration,
    ) -> Result<SessionResult> {
        if command.trim().is_empty() {
            return Err(Error::EmptyCommand);
        }

        let mut result = SessionResult::begin(command, self.working_dir.clone());
        let started = Instant::now();
        self.transient.clear();

        let mut child = self.spawn_child(command)?;
        self.state = SessionState::Running;
        debug!(
            "[{}] spawned '{}' in {}",
            result.id,
            command,
            self.working_dir.display()
        );

        let out_reader = child
            .stdout
            .take()
            .map(|out| spawn_line_reader(out, Arc::clone(&self.transient), StreamKind::Info));
        let err_reader = child
            .stderr
            .take()
            .map(|err| spawn_line_reader(err, Arc::clone(&self.transient), StreamKind::Error));

        // Exit condition, bounded by the configured timeout
        let exit_status = match self.timeout {
            None => Some(child.wait().await?),
            Some(limit) => match time::timeout(limit, child.wait()).await {
                Ok(status) => Some(status?),
                Err(_) => None,
            },
        };

        let outcome = match exit_status {
            Some(status) => {
                self.state = SessionState::Draining;
                wait_for_quiescence(&self.transient, settle_window).await;

                // EOF normally ends the readers with the child; abort
                // covers pipes held open by surviving grandchildren.
                for task in [&out_reader, &err_reader].into_iter().flatten() {
                    task.abort();
                }

                // "not yet available" also covers death by signal
                let code = status.code().unwrap_or(0);
                let exit_ok = code == 0;
                let info_text = self.transient.info().text();
                let error_text = self.transient.error().text();

                self.transient.merge_into(&self.cumulative, exit_ok);
                self.transient.clear();
                self.last_status = code;

                result.status = code;
                if exit_ok {
                    result.info = format!("{}{}", info_text, error_text);
                    ExecutionOutcome::Clean
                } else {
                    result.info = info_text;
                    result.error = error_text;
                    ExecutionOutcome::CommandError
                }
            }
            None => {
                // The timeout stops the waiting logic only; the child is
                // left running and the caller owns any further kill.
                warn!("[{}] '{}' timed out", result.id, command);
                for task in [&out_reader, &err_reader].into_iter().flatten() {
                    task.abort();
                }

                result.info = self.transient.info().text();
                result.error = self.transient.error().text();
                self.transient.merge_into(&self.cumulative, false);
                self.transient.clear();
                self.last_status = 0;
                result.status = 0;
                ExecutionOutcome::TimedOut
            }
        };

        self.child = Some(child);
        result.outcome = outcome;
        result.duration = started.elapsed();
        self.state = SessionState::Settled(outcome);
        debug!(
            "[{}] settled as {} (status {}) after {:?}",
            result.id,
            outcome.as_str(),
            result.status,
            result.duration
        );

        match outcome {
            ExecutionOutcome::CommandError if self.break_on_error => Err(Error::CommandFailed {
                command: command.to_string(),
                working_dir: self.working_dir.clone(),
                status: result.status,
                error_output: result.error.clone(),
            }),
            ExecutionOutcome::TimedOut if self.break_on_error => Err(Error::CommandTimeout {
                command: command.to_string(),
                working_dir: self.working_dir.clone(),
                duration: self.timeout.unwrap_or_default(),
                error_output: result.error.clone(),
            }),
            _ => Ok(result),
        }
    }

    /// Build and spawn the child process. The environment is passed as an
    /// explicit snapshot; the session never touches the process-global
    /// environment.
    fn spawn_child(&self, command: &str) -> Result<Child> {
        let [shell, flag] = self.os.shell_launcher();
        let mut cmd = Command::new(shell);
        cmd.arg(flag)
            .arg(command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_clear()
            .envs(effective_environment(&self.env_vars, self.inherit_env));

        cmd.spawn().map_err(|e| Error::LaunchFailed {
            command: command.to_string(),
            working_dir: self.working_dir.clone(),
            reason: e.to_string(),
        })
    }

    // === Inspection surface ===

    /// Exit status of the last invocation (0 before any execution)
    pub fn status(&self) -> i32 {
        self.last_status
    }

    /// Session state as of the last transition
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Accumulated info output across invocations
    pub fn console_info(&self) -> String {
        self.cumulative.info().text()
    }

    /// Accumulated error output across invocations
    pub fn console_error(&self) -> String {
        self.cumulative.error().text()
    }

    /// Accumulated info output, one entry per captured line
    pub fn info_lines(&self) -> Vec<String> {
        self.cumulative.info().lines()
    }

    /// Accumulated error output, one entry per captured line
    pub fn error_lines(&self) -> Vec<String> {
        self.cumulative.error().lines()
    }

    /// Total captured lines across both cumulative buffers
    pub fn message_count(&self) -> usize {
        self.cumulative.message_count()
    }

    /// Handle of the most recently spawned child, if any. After a timeout
    /// the process behind it may still be running.
    pub fn process(&self) -> Option<&Child> {
        self.child.as_ref()
    }

    /// Operating system family the session classifies commands for
    pub fn os_family(&self) -> OsFamily {
        self.os
    }

    // === Configuration surface (fluent) ===

    /// Current working directory for spawned commands
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Set the working directory for spawned commands
    pub fn set_working_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.working_dir = dir.into();
        self
    }

    /// Configured timeout; `None` means wait indefinitely
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Set the timeout bounding the wait for child exit. `None` disables
    /// the bound.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Configured settle window
    pub fn settle_window(&self) -> Duration {
        self.settle_window
    }

    /// Set the default settle window for subsequent invocations
    pub fn set_settle_window(&mut self, settle_window: Duration) -> &mut Self {
        self.settle_window = settle_window;
        self
    }

    /// Whether command failures and timeouts raise errors
    pub fn break_on_error(&self) -> bool {
        self.break_on_error
    }

    /// Enable or disable failure escalation
    pub fn set_break_on_error(&mut self, break_on_error: bool) -> &mut Self {
        self.break_on_error = break_on_error;
        self
    }

    /// Whether the child inherits this process's environment
    pub fn inherit_env(&self) -> bool {
        self.inherit_env
    }

    /// Control environment inheritance for spawned commands
    pub fn set_inherit_env(&mut self, inherit: bool) -> &mut Self {
        self.inherit_env = inherit;
        self
    }

    /// Set one environment variable for spawned commands, on top of the
    /// inherited snapshot when inheritance is enabled
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Clear the accumulated info and error output
    pub fn clear_console(&mut self) -> &mut Self {
        self.cumulative.clear();
        self
    }

    // === Observer registration ===

    /// Observe every info line as it streams in, before any merge
    pub fn on_info_line<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.transient.info().observe(Box::new(observer));
        self
    }

    /// Observe every error line as it streams in, before any merge
    pub fn on_error_line<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.transient.error().observe(Box::new(observer));
        self
    }

    /// Observe info lines as they are merged into the cumulative transcript
    pub fn on_merged_info<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.cumulative.info().observe(Box::new(observer));
        self
    }

    /// Observe error lines as they are merged into the cumulative transcript
    pub fn on_merged_error<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.cumulative.error().observe(Box::new(observer));
        self
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll the transcript's progress counter until it has been stable for
/// `settle_window`. The counter is monotonic between clears, so a stable
/// reading means no line arrived during the window.
async fn wait_for_quiescence(transient: &Console, settle_window: Duration) {
    let mut last = transient.message_count();
    let mut quiet = Duration::ZERO;
    while quiet < settle_window {
        time::sleep(SETTLE_POLL_INTERVAL).await;
        let current = transient.message_count();
        if current == last {
            quiet += SETTLE_POLL_INTERVAL;
        } else {
            last = current;
            quiet = Duration::ZERO;
        }
    }
}

/// Explicit snapshot of the environment a child will be spawned with
pub fn effective_environment(
    custom_env: &HashMap<String, String>,
    inherit: bool,
) -> HashMap<String, String> {
    let mut env = if inherit {
        std::env::vars().collect()
    } else {
        HashMap::new()
    };

    for (key, value) in custom_env {
        env.insert(key.clone(), value.clone());
    }

    env
}
