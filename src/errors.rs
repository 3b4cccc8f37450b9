// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! A command that exits non-zero is *not* an error at this level: it is
//! reported as [`CommandOutcome::Failed`](crate::exec::CommandOutcome) and
//! handled by the plan. The variants here are system-level failures that
//! abort the whole run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmdplanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to spawn shell for command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command not found: no command with index {0} in plan")]
    CommandNotFound(usize),

    #[error("Plan failed: {0}")]
    PlanFailed(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CmdplanError>;
