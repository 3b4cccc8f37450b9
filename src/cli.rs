// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::Channel;

/// Command-line arguments for `cmdplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cmdplan",
    version,
    about = "Run a named sequence of shell commands, stopping at the first failure.",
    long_about = None
)]
#[command(group(ArgGroup::new("selection").multiple(false)))]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Plan.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub plan: PathBuf,

    /// Run only the commands with these 1-based indices (comma separated).
    #[arg(long, value_name = "INDICES", value_delimiter = ',', group = "selection")]
    pub only: Vec<usize>,

    /// Run every command except those with these indices.
    #[arg(long, value_name = "INDICES", value_delimiter = ',', group = "selection")]
    pub except: Vec<usize>,

    /// Run the commands before this index.
    #[arg(long, value_name = "INDEX", group = "selection")]
    pub before: Option<usize>,

    /// Run the commands after this index.
    #[arg(long, value_name = "INDEX", group = "selection")]
    pub after: Option<usize>,

    /// Print the numbered command list and exit.
    #[arg(long)]
    pub list: bool,

    /// Print what would be run without executing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Log file path; overrides `[logging].file`.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Do not write a log file at all.
    #[arg(long, conflicts_with = "log_file")]
    pub no_log_file: bool,

    /// Append to the log file instead of truncating it.
    #[arg(long)]
    pub append: bool,

    /// Lowest channel shown on the console (error, statistic, command, output).
    #[arg(long, value_name = "CHANNEL")]
    pub console_level: Option<Channel>,

    /// Lowest channel written to the log file.
    #[arg(long, value_name = "CHANNEL")]
    pub file_level: Option<Channel>,

    /// Level for internal diagnostics (off, error, warn, info, debug, trace).
    ///
    /// If omitted, `CMDPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
