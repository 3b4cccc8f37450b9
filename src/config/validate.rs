// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CmdplanError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CmdplanError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.plan, raw.logging, raw.commands))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_plan_section(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_plan_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.plan.name.trim().is_empty() {
        return Err(CmdplanError::ConfigError(
            "[plan].name must not be empty".to_string(),
        ));
    }

    if cfg.plan.shell.trim().is_empty() {
        return Err(CmdplanError::ConfigError(
            "[plan].shell must not be empty".to_string(),
        ));
    }

    Ok(())
}

// Channel names and file_mode are strongly typed and rejected during
// deserialization, so only free-form strings are checked here.
fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (i, command) in cfg.commands.iter().enumerate() {
        if command.cmd.trim().is_empty() {
            return Err(CmdplanError::ConfigError(format!(
                "command {} has an empty `cmd`",
                i + 1
            )));
        }
    }
    Ok(())
}
