// src/logging.rs

//! Logging setup for `cmdplan` using `tracing` + `tracing-subscriber`.
//!
//! Two destinations are installed, each with its own filter:
//! - the console (STDERR), by default showing only `error` and `statistic`
//!   channel messages, a terse progress view;
//! - the log file, by default showing everything down to raw command output.
//!
//! Plan messages are emitted by [`TracingSink`](crate::sink::TracingSink)
//! on the [`SINK_TARGET`] target and filtered by [`Channel`]. Everything else
//! (crate-internal diagnostics) is filtered by a plain tracing level chosen by:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `CMDPLAN_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::cli::LogLevel;
use crate::sink::SINK_TARGET;
use crate::types::{Channel, FileMode};

/// Where plan messages go and how much of them each destination shows.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub console_level: Channel,
    /// `None` disables the file destination.
    pub file: Option<PathBuf>,
    pub file_level: Channel,
    pub file_mode: FileMode,
    pub diagnostics: Option<LogLevel>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            console_level: Channel::Statistic,
            file: None,
            file_level: Channel::Output,
            file_mode: FileMode::Write,
            diagnostics: None,
        }
    }
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let diagnostics = diagnostics_level(options.diagnostics);

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(false)
        .with_filter(destination_filter(options.console_level, diagnostics));

    let file = match options.file.as_deref() {
        Some(path) => {
            let handle = open_log_file(path, options.file_mode)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(handle))
                    .with_ansi(false)
                    .with_target(false)
                    .with_level(false)
                    .with_filter(destination_filter(options.file_level, diagnostics)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("installing global tracing subscriber")?;

    Ok(())
}

/// Filter for one destination: sink events by channel threshold, everything
/// else by the diagnostics level.
pub fn destination_filter(threshold: Channel, diagnostics: LevelFilter) -> Targets {
    Targets::new()
        .with_default(diagnostics)
        .with_target(SINK_TARGET, threshold.threshold())
}

fn open_log_file(path: &Path, mode: FileMode) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {:?}", parent))?;
        }
    }

    let mut opts = OpenOptions::new();
    opts.create(true);
    match mode {
        FileMode::Write => opts.write(true).truncate(true),
        FileMode::Append => opts.append(true),
    };

    opts.open(path)
        .with_context(|| format!("opening log file {:?}", path))
}

fn diagnostics_level(cli_level: Option<LogLevel>) -> LevelFilter {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("CMDPLAN_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(LevelFilter::WARN),
    }
}

fn level_from_log_level(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
