// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the commands of a plan,
//! using `tokio::process::Command`, and reporting back an outcome the plan
//! can act on.
//!
//! - [`shell`] spawns one command through a shell and multiplexes its three
//!   streams until both output streams close.
//! - [`input`] holds the queue of input lines fed to the child's stdin.
//! - [`backend`] provides the `ExecutorBackend` trait and the
//!   `CommandOutcome` the plan inspects; tests can replace the shell
//!   executor with a fake implementation.

pub mod backend;
pub mod input;
pub mod shell;

pub use backend::{CommandOutcome, ExecutorBackend};
pub use input::PendingInput;
pub use shell::{DEFAULT_SHELL, READ_SIZE, ShellExecutor};
