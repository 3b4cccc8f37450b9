// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::DEFAULT_SHELL;
use crate::plan::{Command, Plan};
use crate::types::{Channel, FileMode};

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [plan]
/// name = "Directory listings"
///
/// [logging]
/// console_level = "statistic"
///
/// [[command]]
/// cmd = "ls /"
/// description = "List root dir"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub plan: PlanSection,

    #[serde(default)]
    pub logging: LoggingSection,

    /// All `[[command]]` entries, in file order.
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

/// `[plan]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanSection {
    /// Name used in the summary line and the default log file name.
    pub name: String,

    /// Shell every command is run through as `<shell> -c <cmd>`.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

/// `[logging]` section.
///
/// Two destinations, each with its own lowest channel shown.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log file path; defaults to `./<plan name>.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default = "default_file_level")]
    pub file_level: Channel,

    #[serde(default = "default_console_level")]
    pub console_level: Channel,

    #[serde(default)]
    pub file_mode: FileMode,
}

fn default_file_level() -> Channel {
    Channel::Output
}

fn default_console_level() -> Channel {
    Channel::Statistic
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: None,
            file_level: default_file_level(),
            console_level: default_console_level(),
            file_mode: FileMode::default(),
        }
    }
}

/// One `[[command]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    pub cmd: String,

    #[serde(default)]
    pub description: String,

    /// Text fed to the command's stdin, line by line.
    #[serde(default)]
    pub input: Option<String>,
}

impl CommandConfig {
    pub fn to_command(&self) -> Command {
        let command = Command::new(self.cmd.clone()).with_description(self.description.clone());
        match self.input.as_deref() {
            Some(input) => command.with_input(input),
            None => command,
        }
    }
}

/// Validated plan file. Build with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub plan: PlanSection,
    pub logging: LoggingSection,
    pub commands: Vec<CommandConfig>,
}

impl ConfigFile {
    /// Wrap sections that are already known to be valid.
    pub fn new_unchecked(
        plan: PlanSection,
        logging: LoggingSection,
        commands: Vec<CommandConfig>,
    ) -> Self {
        Self {
            plan,
            logging,
            commands,
        }
    }

    /// Effective log file path.
    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./{}.log", self.plan.name)))
    }

    /// Build the plan described by this file, using the default sink and a
    /// shell executor for the configured shell.
    pub fn build_plan(&self) -> Plan {
        let executor = crate::exec::ShellExecutor::new().with_shell(self.plan.shell.clone());
        Plan::with_commands(
            self.plan.name.clone(),
            self.commands.iter().map(CommandConfig::to_command),
        )
        .with_executor(std::sync::Arc::new(executor))
    }
}
