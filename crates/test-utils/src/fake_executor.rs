use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use cmdplan::errors::Result;
use cmdplan::exec::{CommandOutcome, ExecutorBackend};
use cmdplan::plan::{Command, ExecutionError};
use cmdplan::sink::LogSink;

/// A fake executor that:
/// - records which command texts were "run"
/// - echoes the command text to the output channel
/// - fails the commands it was told to fail, succeeds the rest.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    failures: HashMap<String, (i32, String)>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `text` exit with `exit_code` and the given stderr.
    pub fn failing(mut self, text: &str, exit_code: i32, std_err: &str) -> Self {
        self.failures
            .insert(text.to_string(), (exit_code, std_err.to_string()));
        self
    }

    /// Command texts executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute<'a>(
        &'a self,
        command: &'a Command,
        sink: &'a dyn LogSink,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>> {
        Box::pin(async move {
            command.mark_started();
            self.executed
                .lock()
                .unwrap()
                .push(command.text().to_string());
            sink.log_output(command.text());

            let outcome = match self.failures.get(command.text()) {
                Some((exit_code, std_err)) => CommandOutcome::Failed(ExecutionError {
                    command: command.text().to_string(),
                    exit_code: *exit_code,
                    std_err: std_err.clone(),
                }),
                None => CommandOutcome::Success,
            };

            command.mark_finished(outcome.is_success());
            Ok(outcome)
        })
    }
}
