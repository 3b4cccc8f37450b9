use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// One of the four leveled logging channels a plan writes to.
///
/// Variants are declared from highest to lowest priority, so the derived
/// `Ord` sorts `Error` first. A destination configured with threshold `t`
/// shows every channel `c` with `c <= t`.
///
/// - `Error`: command failure details.
/// - `Statistic`: progress and results (start/end/summary lines).
/// - `Command`: the full command text about to run.
/// - `Output`: raw process output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Error,
    Statistic,
    Command,
    Output,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Error,
        Channel::Statistic,
        Channel::Command,
        Channel::Output,
    ];

    /// The tracing level sink events on this channel are emitted at.
    pub fn level(self) -> tracing::Level {
        match self {
            Channel::Error => tracing::Level::ERROR,
            Channel::Statistic => tracing::Level::WARN,
            Channel::Command => tracing::Level::INFO,
            Channel::Output => tracing::Level::DEBUG,
        }
    }

    /// Filter that lets this channel and every higher-priority one through.
    pub fn threshold(self) -> LevelFilter {
        LevelFilter::from_level(self.level())
    }

    /// Whether a destination with threshold `self` shows `other`.
    pub fn admits(self, other: Channel) -> bool {
        other <= self
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Channel::Error => "error",
            Channel::Statistic => "statistic",
            Channel::Command => "command",
            Channel::Output => "output",
        };
        f.write_str(s)
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Channel::Error),
            "statistic" => Ok(Channel::Statistic),
            "command" => Ok(Channel::Command),
            "output" => Ok(Channel::Output),
            other => Err(format!(
                "invalid channel: {other} (expected \"error\", \"statistic\", \"command\" or \"output\")"
            )),
        }
    }
}

/// How the log file is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    /// Truncate any previous log.
    #[default]
    Write,
    /// Keep previous runs and append.
    Append,
}

impl FromStr for FileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "write" => Ok(FileMode::Write),
            "append" => Ok(FileMode::Append),
            other => Err(format!(
                "invalid file_mode: {other} (expected \"write\" or \"append\")"
            )),
        }
    }
}
