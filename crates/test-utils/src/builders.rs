#![allow(dead_code)]

use std::sync::Arc;

use cmdplan::exec::ExecutorBackend;
use cmdplan::plan::{Command, Plan};
use cmdplan::sink::LogSink;

use crate::recording_sink::RecordingSink;

/// Builder for `Plan` to simplify test setup.
///
/// Defaults to a fresh [`RecordingSink`] so tests never write through the
/// global tracing subscriber unless they ask to.
pub struct PlanBuilder {
    name: String,
    commands: Vec<Command>,
    sink: Arc<dyn LogSink>,
    executor: Option<Arc<dyn ExecutorBackend>>,
}

impl PlanBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
            sink: Arc::new(RecordingSink::new()),
            executor: None,
        }
    }

    /// Add `text` with the given description.
    pub fn command(mut self, text: &str, description: &str) -> Self {
        self.commands
            .push(Command::new(text).with_description(description));
        self
    }

    /// Add `text` with stdin input.
    pub fn command_with_input(mut self, text: &str, description: &str, input: &str) -> Self {
        self.commands.push(
            Command::new(text)
                .with_description(description)
                .with_input(input),
        );
        self
    }

    /// Add `count` commands `echo 1` .. `echo count`, described `Echo N`.
    pub fn echoes(mut self, count: usize) -> Self {
        for i in 1..=count {
            self.commands
                .push(Command::new(format!("echo {i}")).with_description(format!("Echo {i}")));
        }
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn executor(mut self, executor: impl ExecutorBackend + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    pub fn build(self) -> Plan {
        let plan = Plan::with_commands(self.name, self.commands).with_sink(self.sink);
        match self.executor {
            Some(executor) => plan.with_executor(executor),
            None => plan,
        }
    }
}
