// src/exec/shell.rs

//! Single-command execution engine.
//!
//! A command is run as `<shell> -c "<text>"` so the text may use pipes,
//! redirections and the rest of shell syntax. Its stdout and stderr are read
//! concurrently from one task with `tokio::select!`: draining one stream
//! fully before the other could deadlock once the child fills the OS buffer
//! of the stream nobody is reading.

use std::io;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, anyhow};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout, Command as ProcessCommand};
use tracing::{debug, trace};

use crate::errors::{CmdplanError, Result};
use crate::exec::backend::{CommandOutcome, ExecutorBackend};
use crate::exec::input::PendingInput;
use crate::plan::{Command, ExecutionError};
use crate::sink::LogSink;

/// Bytes read from a stream per readiness event.
pub const READ_SIZE: usize = 1024;

/// Shell used when none is configured.
pub const DEFAULT_SHELL: &str = "bash";

/// Runs commands through a shell, one at a time.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    read_size: usize,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            read_size: READ_SIZE,
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Run `command` to completion, streaming its output to `sink`.
    ///
    /// Returns `CommandOutcome::Failed` for a non-zero exit code and `Err`
    /// only when the process could not be spawned or its pipes failed.
    /// The command's execution record is stamped on every path.
    pub async fn run(&self, command: &Command, sink: &dyn LogSink) -> Result<CommandOutcome> {
        command.mark_started();
        let result = self.run_process(command, sink).await;
        let succeeded = matches!(result, Ok(CommandOutcome::Success));
        command.mark_finished(succeeded);
        result
    }

    async fn run_process(&self, command: &Command, sink: &dyn LogSink) -> Result<CommandOutcome> {
        debug!(shell = %self.shell, cmd = %command.text(), "spawning shell process");

        let mut child = ProcessCommand::new(&self.shell)
            .arg("-c")
            .arg(command.text())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CmdplanError::Spawn {
                command: command.text().to_string(),
                source,
            })?;

        let input = PendingInput::new(command.input_lines());
        // Without input the pipe is closed right away and never written.
        let stdin = if input.is_empty() {
            None
        } else {
            child.stdin.take()
        };
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("stdout pipe missing for '{}'", command.text()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("stderr pipe missing for '{}'", command.text()))?;
        drop(child.stdin.take());

        let streams = Streams {
            stdin,
            input,
            stdout,
            stderr,
        };
        let captured = self.pump(streams, sink).await?;

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for process of '{}'", command.text()))?;
        let code = exit_code(status);

        debug!(
            cmd = %command.text(),
            exit_code = code,
            success = status.success(),
            "shell process exited"
        );

        if code == 0 {
            return Ok(CommandOutcome::Success);
        }

        Ok(CommandOutcome::Failed(ExecutionError {
            command: command.text().to_string(),
            exit_code: code,
            std_err: String::from_utf8_lossy(&captured).trim_end().to_string(),
        }))
    }

    /// Multiplex the child's streams until stdout and stderr have both
    /// reached end of file. Returns everything read from stderr.
    async fn pump(&self, streams: Streams, sink: &dyn LogSink) -> Result<Vec<u8>> {
        let Streams {
            mut stdin,
            mut input,
            mut stdout,
            mut stderr,
        } = streams;

        let mut out_buf = vec![0u8; self.read_size];
        let mut err_buf = vec![0u8; self.read_size];
        let mut out_open = true;
        let mut err_open = true;
        let mut captured = Vec::new();

        while out_open || err_open {
            let writable = stdin.is_some() && !input.is_empty();

            tokio::select! {
                written = write_front(&mut stdin, &input), if writable => {
                    match written {
                        Ok(0) => {
                            debug!(remaining = input.len(), "stdin accepts no more data; dropping input");
                            input.clear();
                        }
                        Ok(n) => {
                            if input.advance(n) {
                                trace!(remaining = input.len(), "input line written");
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                            debug!(remaining = input.len(), "stdin closed by child; dropping input");
                            input.clear();
                        }
                        Err(e) => {
                            return Err(anyhow::Error::new(e)
                                .context("writing input to child stdin")
                                .into());
                        }
                    }
                    if input.is_empty() {
                        // Closing the pipe lets the child see end of input.
                        stdin = None;
                    }
                }

                read = stdout.read(&mut out_buf), if out_open => {
                    let n = read.context("reading child stdout")?;
                    if n == 0 {
                        trace!("stdout closed");
                        out_open = false;
                    } else {
                        log_chunk(sink, &out_buf[..n]);
                    }
                }

                read = stderr.read(&mut err_buf), if err_open => {
                    let n = read.context("reading child stderr")?;
                    if n == 0 {
                        trace!("stderr closed");
                        err_open = false;
                    } else {
                        captured.extend_from_slice(&err_buf[..n]);
                        log_chunk(sink, &err_buf[..n]);
                    }
                }
            }
        }

        Ok(captured)
    }
}

impl ExecutorBackend for ShellExecutor {
    fn execute<'a>(
        &'a self,
        command: &'a Command,
        sink: &'a dyn LogSink,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<CommandOutcome>> + Send + 'a>>
    {
        Box::pin(self.run(command, sink))
    }
}

/// The three pipes of one child, owned for the duration of a single run.
struct Streams {
    stdin: Option<ChildStdin>,
    input: PendingInput,
    stdout: ChildStdout,
    stderr: ChildStderr,
}

/// Write (part of) the front input line. A single `write` call either
/// transfers bytes or does not, so losing this future to another `select!`
/// branch never loses or duplicates input.
async fn write_front(stdin: &mut Option<ChildStdin>, input: &PendingInput) -> io::Result<usize> {
    match (stdin.as_mut(), input.front()) {
        (Some(pipe), Some(bytes)) => pipe.write(bytes).await,
        _ => std::future::pending().await,
    }
}

fn log_chunk(sink: &dyn LogSink, chunk: &[u8]) {
    let text = String::from_utf8_lossy(chunk);
    sink.log_output(text.trim_end());
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
