//! Output Buffers
//!
//! Append-only transcripts of child-process output. A buffer accumulates
//! decoded lines pushed by a stream reader and fans each one out to its
//! registered observers; a `Console` pairs the info and error buffers of
//! one transcript.
//!
//! `append` is the sole mutator and is atomic per call; `count` reads an
//! atomic counter so the session's settle loop can poll progress without
//! taking the line lock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::models::OutputLine;

/// Callback invoked for every line appended to a buffer
pub type LineObserver = Box<dyn Fn(&str) + Send + Sync>;

/// Which child stream a line arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Standard output
    Info,
    /// Standard error
    Error,
}

/// An ordered, append-only collection of output lines with observer fan-out
#[derive(Default)]
pub struct OutputBuffer {
    lines: Mutex<Vec<OutputLine>>,
    observers: Mutex<Vec<LineObserver>>,
    count: AtomicUsize,
}

// A poisoned lock still guards a valid transcript; recover the guard
// instead of dropping output on the floor.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl OutputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, notifying every observer in registration order.
    /// Observers see each line at most once, synchronously, in append order.
    pub fn append(&self, text: impl Into<String>) {
        let text = text.into();
        let mut lines = relock(&self.lines);
        let line = OutputLine::new(text, lines.len());
        {
            let observers = relock(&self.observers);
            for observer in observers.iter() {
                observer(&line.text);
            }
        }
        lines.push(line);
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Register an observer for future appends
    pub fn observe(&self, observer: LineObserver) {
        relock(&self.observers).push(observer);
    }

    /// Concatenation of all line texts, with no added separators
    pub fn text(&self) -> String {
        relock(&self.lines)
            .iter()
            .map(|line| line.text.as_str())
            .collect()
    }

    /// The ordered line texts
    pub fn lines(&self) -> Vec<String> {
        relock(&self.lines)
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }

    /// The ordered lines with their arrival metadata
    pub fn units(&self) -> Vec<OutputLine> {
        relock(&self.lines).clone()
    }

    /// Number of appended lines. Monotonically non-decreasing between
    /// `clear` calls; the session uses this as its progress signal.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Remove all accumulated lines. Observers stay registered.
    pub fn clear(&self) {
        let mut lines = relock(&self.lines);
        lines.clear();
        self.count.store(0, Ordering::SeqCst);
    }
}

/// The info and error buffers of one transcript
#[derive(Default)]
pub struct Console {
    info: OutputBuffer,
    error: OutputBuffer,
}

impl Console {
    /// Create an empty console
    pub fn new() -> Self {
        Self::default()
    }

    /// The info (stdout) buffer
    pub fn info(&self) -> &OutputBuffer {
        &self.info
    }

    /// The error (stderr) buffer
    pub fn error(&self) -> &OutputBuffer {
        &self.error
    }

    /// Append a line to the buffer of the given stream
    pub fn append(&self, stream: StreamKind, text: impl Into<String>) {
        match stream {
            StreamKind::Info => self.info.append(text),
            StreamKind::Error => self.error.append(text),
        }
    }

    /// Combined line count of both buffers
    pub fn message_count(&self) -> usize {
        self.info.count() + self.error.count()
    }

    /// Merge this console's lines into `target`. Info lines always land in
    /// the target's info buffer. Error lines land in the target's error
    /// buffer only when `exit_ok` is false; a clean exit demotes stderr
    /// content to diagnostic noise and folds it into info.
    pub fn merge_into(&self, target: &Console, exit_ok: bool) {
        for line in self.info.lines() {
            target.info.append(line);
        }
        for line in self.error.lines() {
            if exit_ok {
                target.info.append(line);
            } else {
                target.error.append(line);
            }
        }
    }

    /// Empty both buffers
    pub fn clear(&self) {
        self.info.clear();
        self.error.clear();
    }
}
