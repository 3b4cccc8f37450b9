// src/plan/command.rs

//! A single unit of work: shell text, a label, optional input, and the
//! timing/state recorded by the last execution.

use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant, SystemTime};

use thiserror::Error;

/// Execution state of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    /// Never executed.
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Snapshot of what the most recent execution of a command recorded.
///
/// `started_at`/`ended_at` are wall-clock; `duration` is measured with a
/// monotonic clock so it is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionRecord {
    pub state: CommandState,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    pub duration: Duration,
}

/// Structured record of a command that exited with a non-zero code.
///
/// The `Display` form is appended verbatim to the plan's failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\nBash command: {command}\nExit code: {exit_code}\nStd err: {std_err}")]
pub struct ExecutionError {
    pub command: String,
    pub exit_code: i32,
    /// Captured standard error with trailing whitespace removed.
    pub std_err: String,
}

/// One external shell invocation.
///
/// Commands are shared between a plan and any plans filtered from it, so the
/// mutable part (the [`ExecutionRecord`]) sits behind a lock that is only held
/// for the instant it takes to stamp a start or an end.
#[derive(Debug)]
pub struct Command {
    text: String,
    description: String,
    input_lines: Vec<String>,
    timing: Mutex<Timing>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Timing {
    record: ExecutionRecord,
    clock: Option<Instant>,
}

impl Command {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: String::new(),
            input_lines: Vec::new(),
            timing: Mutex::new(Timing::default()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Feed `input` to the process, one line at a time.
    ///
    /// Trailing whitespace is dropped, the rest is split on `\n` and every
    /// line gets its terminator back. An empty string means no input.
    pub fn with_input(mut self, input: &str) -> Self {
        self.input_lines = split_input(input);
        self
    }

    /// Append one input line; the terminator is added if missing.
    pub fn with_input_line(mut self, line: impl Into<String>) -> Self {
        let mut line = line.into();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.input_lines.push(line);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Pending input, each line including its `\n`.
    pub fn input_lines(&self) -> &[String] {
        &self.input_lines
    }

    /// Latest execution record.
    pub fn record(&self) -> ExecutionRecord {
        lock(&self.timing).record
    }

    pub fn state(&self) -> CommandState {
        lock(&self.timing).record.state
    }

    pub fn duration(&self) -> Duration {
        lock(&self.timing).record.duration
    }

    /// Stamp the start of an execution and move to `Running`.
    ///
    /// Called by executor backends; a previous record is overwritten.
    pub fn mark_started(&self) {
        *lock(&self.timing) = Timing {
            record: ExecutionRecord {
                state: CommandState::Running,
                started_at: Some(SystemTime::now()),
                ended_at: None,
                duration: Duration::ZERO,
            },
            clock: Some(Instant::now()),
        };
    }

    /// Stamp the end of an execution with its final state.
    pub fn mark_finished(&self, succeeded: bool) {
        let mut timing = lock(&self.timing);
        let elapsed = timing
            .clock
            .take()
            .map(|start| start.elapsed())
            .unwrap_or_default();

        let record = &mut timing.record;
        record.state = if succeeded {
            CommandState::Succeeded
        } else {
            CommandState::Failed
        };
        record.ended_at = Some(SystemTime::now());
        record.duration = elapsed;
    }
}

impl Clone for Command {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            description: self.description.clone(),
            input_lines: self.input_lines.clone(),
            timing: Mutex::new(*lock(&self.timing)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Command> \"{}\" \"{}\"", self.description, self.text)
    }
}

fn split_input(input: &str) -> Vec<String> {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(|line| format!("{line}\n")).collect()
}

// A poisoned record is still a valid record; keep going with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
