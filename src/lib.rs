// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plan;
pub mod sink;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::load_and_validate;
use crate::errors::CmdplanError;
use crate::logging::LoggingOptions;
use crate::plan::{Plan, messages};

pub use crate::exec::{CommandOutcome, ExecutorBackend, ShellExecutor};
pub use crate::plan::{Command, ExecutionError, PlanReport, PlanResult};
pub use crate::sink::{LogSink, TracingSink};
pub use crate::types::Channel;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan file loading
/// - command selection (`--only`, `--except`, `--before`, `--after`)
/// - console + file logging
/// - plan execution
///
/// A plan that finishes `FAILED` is returned as [`CmdplanError::PlanFailed`]
/// so the binary exits non-zero.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.plan)?;
    let plan = select_commands(&args, cfg.build_plan())?;

    if args.list {
        println!("{plan}");
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    logging::init_logging(&logging_options(&args, &cfg))?;

    let report = plan.execute().await?;
    if report.succeeded() {
        Ok(())
    } else {
        Err(CmdplanError::PlanFailed(report.plan_name).into())
    }
}

/// Apply the (mutually exclusive) selection flags to `plan`.
///
/// Indices listed for `--only`/`--except` must name existing commands. The
/// `--before`/`--after` pivot is only compared against, so `--before n+1` or
/// `--after 0` selects the whole plan.
pub fn select_commands(args: &CliArgs, plan: Plan) -> crate::errors::Result<Plan> {
    let name = plan.name().to_string();

    if !args.only.is_empty() {
        ensure_indices(&plan, &args.only)?;
        return Ok(plan.subset(format!("{name} (subset)"), &args.only));
    }
    if !args.except.is_empty() {
        ensure_indices(&plan, &args.except)?;
        return Ok(plan.except_subset(format!("{name} (except)"), &args.except));
    }
    if let Some(index) = args.before {
        return Ok(plan.before(format!("{name} (before {index})"), index));
    }
    if let Some(index) = args.after {
        return Ok(plan.after(format!("{name} (after {index})"), index));
    }

    Ok(plan)
}

fn ensure_indices(plan: &Plan, indices: &[usize]) -> crate::errors::Result<()> {
    match indices.iter().find(|&&i| plan.get(i).is_none()) {
        Some(&missing) => Err(CmdplanError::CommandNotFound(missing)),
        None => Ok(()),
    }
}

/// Combine `[logging]` from the plan file with CLI overrides.
pub fn logging_options(args: &CliArgs, cfg: &ConfigFile) -> LoggingOptions {
    let file = if args.no_log_file {
        None
    } else {
        Some(args.log_file.clone().unwrap_or_else(|| cfg.log_file()))
    };

    LoggingOptions {
        console_level: args.console_level.unwrap_or(cfg.logging.console_level),
        file,
        file_level: args.file_level.unwrap_or(cfg.logging.file_level),
        file_mode: if args.append {
            types::FileMode::Append
        } else {
            cfg.logging.file_mode
        },
        diagnostics: args.log_level,
    }
}

/// Print the start and command lines each command would produce.
fn print_dry_run(plan: &Plan) {
    println!("cmdplan dry-run: {}", plan.name());
    let count = plan.len();
    for (index, command) in plan.commands() {
        println!(
            "  {}",
            messages::start_message(index, count, command.description())
        );
        println!("      {}", messages::command_message(command.text()));
        if !command.input_lines().is_empty() {
            println!("      input: {} line(s)", command.input_lines().len());
        }
    }

    debug!("dry-run complete (no execution)");
}
