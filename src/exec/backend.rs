// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The plan talks to an `ExecutorBackend` instead of spawning processes
//! itself. Production uses [`ShellExecutor`](super::ShellExecutor); tests can
//! provide their own backend that scripts outcomes without touching a shell.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::plan::{Command, ExecutionError};
use crate::sink::LogSink;

/// Outcome of running one command to completion.
///
/// A non-zero exit is an ordinary outcome, not an `Err`: the plan inspects it
/// and decides whether to stop. `Err` is reserved for system failures such as
/// the shell being impossible to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failed(ExecutionError),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    pub fn error(&self) -> Option<&ExecutionError> {
        match self {
            CommandOutcome::Success => None,
            CommandOutcome::Failed(err) => Some(err),
        }
    }
}

/// Trait abstracting how a single command is executed.
///
/// Implementations must stamp the command's timing with
/// [`Command::mark_started`] / [`Command::mark_finished`] so the plan can
/// report durations.
pub trait ExecutorBackend: Send + Sync + Debug {
    fn execute<'a>(
        &'a self,
        command: &'a Command,
        sink: &'a dyn LogSink,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>>;
}
