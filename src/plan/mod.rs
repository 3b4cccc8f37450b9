// src/plan/mod.rs

//! Named, ordered sequences of shell commands.
//!
//! A [`Plan`] drives its commands through an [`ExecutorBackend`] strictly one
//! after another. The first command that fails stops the plan: its failure is
//! logged, its end line is reported as `FAILED`, and no later command is
//! started. Either way a single summary line closes the run.
//!
//! Display indices are 1-based and derived from position, so they are always
//! dense; plans built by the filtering operations in [`filter`] are
//! renumbered from 1.

pub mod command;
pub mod filter;
pub mod messages;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandOutcome, ExecutorBackend, ShellExecutor};
use crate::sink::{LogSink, TracingSink};

pub use command::{Command, CommandState, ExecutionError, ExecutionRecord};

/// Terminal result of one plan execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanResult {
    Succeeded,
    Failed,
}

impl PlanResult {
    /// `OK` or `FAILED`, as written in end and summary lines.
    pub fn label(self) -> &'static str {
        match self {
            PlanResult::Succeeded => messages::RESULT_OK,
            PlanResult::Failed => messages::RESULT_FAILED,
        }
    }
}

/// What happened to one command that was started.
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub index: usize,
    pub description: String,
    pub text: String,
    pub duration: Duration,
    /// `None` when the command exited 0.
    pub error: Option<ExecutionError>,
}

impl CommandReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn label(&self) -> &'static str {
        if self.succeeded() {
            messages::RESULT_OK
        } else {
            messages::RESULT_FAILED
        }
    }
}

/// Result of [`Plan::execute`]: the overall verdict plus one report per
/// command that was started. Commands after a failure have no report.
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub plan_name: String,
    pub result: PlanResult,
    pub total_duration: Duration,
    pub commands: Vec<CommandReport>,
}

impl PlanReport {
    pub fn succeeded(&self) -> bool {
        self.result == PlanResult::Succeeded
    }
}

/// An ordered, named collection of commands plus the sink and executor used
/// to run them.
///
/// Commands are held by `Arc`, so a plan filtered from another shares (and
/// re-times) the very same command objects.
#[derive(Debug, Clone)]
pub struct Plan {
    name: String,
    commands: Vec<Arc<Command>>,
    sink: Arc<dyn LogSink>,
    executor: Arc<dyn ExecutorBackend>,
}

impl Plan {
    /// Empty plan logging through `tracing` and running commands via `bash`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            sink: Arc::new(TracingSink),
            executor: Arc::new(ShellExecutor::new()),
        }
    }

    pub fn with_commands(
        name: impl Into<String>,
        commands: impl IntoIterator<Item = Command>,
    ) -> Self {
        let mut plan = Self::new(name);
        plan.add(commands);
        plan
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn ExecutorBackend>) -> Self {
        self.executor = executor;
        self
    }

    /// Append commands; they are numbered after the existing ones.
    pub fn add(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands.into_iter().map(Arc::new));
    }

    /// Append already-shared commands.
    pub fn add_shared(&mut self, commands: impl IntoIterator<Item = Arc<Command>>) {
        self.commands.extend(commands);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command at 1-based display `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<Command>> {
        index.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    /// Commands paired with their 1-based display index, in order.
    pub fn commands(&self) -> impl Iterator<Item = (usize, &Arc<Command>)> + '_ {
        self.commands.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn executor(&self) -> &Arc<dyn ExecutorBackend> {
        &self.executor
    }

    /// Run every command in order, stopping at the first failure.
    ///
    /// A failing command is not an error here: it is logged and turned into
    /// [`PlanResult::Failed`]. `Err` means a system failure (e.g. the shell
    /// could not be spawned) and aborts without a summary line.
    pub async fn execute(&self) -> Result<PlanReport> {
        let count = self.commands.len();
        let started = Instant::now();
        let mut result = PlanResult::Succeeded;
        let mut reports = Vec::with_capacity(count);

        info!(plan = %self.name, commands = count, "executing plan");

        for (index, command) in self.commands() {
            let description = command.description();
            self.sink
                .log_statistic(&messages::start_message(index, count, description));
            self.sink
                .log_command(&messages::command_message(command.text()));

            let outcome = self.executor.execute(command, self.sink.as_ref()).await?;

            let error = match outcome {
                CommandOutcome::Success => None,
                CommandOutcome::Failed(err) => {
                    self.sink.log_error(&messages::failure_message(&err));
                    Some(err)
                }
            };

            let report = CommandReport {
                index,
                description: description.to_string(),
                text: command.text().to_string(),
                duration: command.duration(),
                error,
            };

            self.sink.log_statistic(&messages::end_message(
                index,
                count,
                description,
                report.label(),
                report.duration,
            ));

            let failed = !report.succeeded();
            reports.push(report);

            if failed {
                debug!(plan = %self.name, index, "command failed; skipping the rest of the plan");
                result = PlanResult::Failed;
                break;
            }
        }

        let total_duration = started.elapsed();
        self.sink.log_statistic(&messages::summary_message(
            &self.name,
            result.label(),
            total_duration,
        ));

        info!(plan = %self.name, result = result.label(), "plan finished");

        Ok(PlanReport {
            plan_name: self.name.clone(),
            result,
            total_duration,
            commands: reports,
        })
    }

    /// New plan over `commands` sharing this plan's sink and executor.
    fn derive(&self, name: impl Into<String>, commands: Vec<Arc<Command>>) -> Plan {
        Plan {
            name: name.into(),
            commands,
            sink: Arc::clone(&self.sink),
            executor: Arc::clone(&self.executor),
        }
    }
}

/// One line per command: `{index} "{description}" "{text}"`, the index
/// zero-padded to the width of the command count.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = messages::index_width(self.commands.len());
        for (index, command) in self.commands() {
            if index > 1 {
                writeln!(f)?;
            }
            write!(
                f,
                "{index:0width$} \"{}\" \"{}\"",
                command.description(),
                command.text()
            )?;
        }
        Ok(())
    }
}
