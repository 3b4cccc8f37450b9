// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use cmdplan::cli::CliArgs;
use cmdplan::config::{load_and_validate, load_from_path};
use cmdplan::errors::CmdplanError;
use cmdplan::types::{Channel, FileMode};
use cmdplan::{logging_options, select_commands};

fn write_plan(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const LISTINGS: &str = r#"
[plan]
name = "Directory listings"

[[command]]
cmd = "ls /"
description = "List root dir"

[[command]]
cmd = "ls / | wc -l"
description = "Count root dirs"

[[command]]
cmd = "sort"
input = """
b
a
"""
"#;

#[test]
fn plan_file_with_defaults_is_loaded() {
    let file = write_plan(LISTINGS);

    let cfg = load_and_validate(file.path()).expect("valid plan");

    assert_eq!(cfg.plan.name, "Directory listings");
    assert_eq!(cfg.plan.shell, "bash");
    assert_eq!(cfg.logging.console_level, Channel::Statistic);
    assert_eq!(cfg.logging.file_level, Channel::Output);
    assert_eq!(cfg.logging.file_mode, FileMode::Write);
    assert_eq!(cfg.log_file(), PathBuf::from("./Directory listings.log"));
    assert_eq!(cfg.commands.len(), 3);

    let plan = cfg.build_plan();
    assert_eq!(plan.name(), "Directory listings");
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.get(2).map(|c| c.text().to_string()), Some("ls / | wc -l".into()));
    assert_eq!(plan.get(3).map(|c| c.description().to_string()), Some(String::new()));
    assert_eq!(
        plan.get(3).map(|c| c.input_lines().to_vec()),
        Some(vec!["b\n".to_string(), "a\n".to_string()])
    );
}

#[test]
fn logging_section_is_honoured() {
    let file = write_plan(
        r#"
[plan]
name = "Quiet"
shell = "sh"

[logging]
file = "logs/quiet.log"
file_level = "command"
console_level = "error"
file_mode = "append"

[[command]]
cmd = "true"
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid plan");

    assert_eq!(cfg.plan.shell, "sh");
    assert_eq!(cfg.log_file(), PathBuf::from("logs/quiet.log"));
    assert_eq!(cfg.logging.file_level, Channel::Command);
    assert_eq!(cfg.logging.console_level, Channel::Error);
    assert_eq!(cfg.logging.file_mode, FileMode::Append);
}

#[test]
fn empty_plan_name_is_a_config_error() {
    let file = write_plan(
        r#"
[plan]
name = "  "
"#,
    );

    match load_and_validate(file.path()) {
        Err(CmdplanError::ConfigError(msg)) => assert!(msg.contains("[plan].name")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn blank_command_text_names_its_index() {
    let file = write_plan(
        r#"
[plan]
name = "Blank"

[[command]]
cmd = "echo ok"

[[command]]
cmd = ""
"#,
    );

    match load_and_validate(file.path()) {
        Err(CmdplanError::ConfigError(msg)) => {
            assert!(msg.contains("command 2"), "message was {msg}");
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_channel_is_rejected_while_parsing() {
    let file = write_plan(
        r#"
[plan]
name = "Bad level"

[logging]
console_level = "verbose"
"#,
    );

    assert!(matches!(
        load_from_path(file.path()),
        Err(CmdplanError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/nonexistent/cmdplan/Plan.toml"),
        Err(CmdplanError::IoError(_))
    ));
}

#[test]
fn cli_selection_maps_to_filtering() {
    let file = write_plan(LISTINGS);
    let cfg = load_and_validate(file.path()).unwrap();

    let args = CliArgs::try_parse_from(["cmdplan", "--only", "3,1"]).unwrap();
    let plan = select_commands(&args, cfg.build_plan()).unwrap();
    assert_eq!(plan.name(), "Directory listings (subset)");
    assert_eq!(plan.get(1).map(|c| c.text().to_string()), Some("ls /".into()));
    assert_eq!(plan.get(2).map(|c| c.text().to_string()), Some("sort".into()));

    let args = CliArgs::try_parse_from(["cmdplan", "--after", "1"]).unwrap();
    let plan = select_commands(&args, cfg.build_plan()).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.name(), "Directory listings (after 1)");

    let args = CliArgs::try_parse_from(["cmdplan", "--except", "9"]).unwrap();
    assert!(matches!(
        select_commands(&args, cfg.build_plan()),
        Err(CmdplanError::CommandNotFound(9))
    ));
}

const FOUR_ECHOES: &str = r#"
[plan]
name = "Echoes"

[[command]]
cmd = "echo 1"

[[command]]
cmd = "echo 2"

[[command]]
cmd = "echo 3"

[[command]]
cmd = "echo 4"
"#;

#[test]
fn cli_pivot_outside_the_plan_selects_everything() {
    let file = write_plan(FOUR_ECHOES);
    let cfg = load_and_validate(file.path()).unwrap();

    let args = CliArgs::try_parse_from(["cmdplan", "--before", "5"]).unwrap();
    let plan = select_commands(&args, cfg.build_plan()).unwrap();
    assert_eq!(plan.len(), 4);
    assert_eq!(plan.name(), "Echoes (before 5)");

    let args = CliArgs::try_parse_from(["cmdplan", "--after", "0"]).unwrap();
    let plan = select_commands(&args, cfg.build_plan()).unwrap();
    assert_eq!(plan.len(), 4);
    assert_eq!(plan.get(1).map(|c| c.text().to_string()), Some("echo 1".into()));

    let args = CliArgs::try_parse_from(["cmdplan", "--after", "9"]).unwrap();
    let plan = select_commands(&args, cfg.build_plan()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn cli_plan_path_defaults_to_plan_toml() {
    let args = CliArgs::try_parse_from(["cmdplan"]).unwrap();
    assert_eq!(args.plan, PathBuf::from("Plan.toml"));
}

#[test]
fn cli_selection_flags_are_mutually_exclusive() {
    assert!(CliArgs::try_parse_from(["cmdplan", "--only", "1", "--before", "2"]).is_err());
    assert!(CliArgs::try_parse_from(["cmdplan", "--log-file", "x.log", "--no-log-file"]).is_err());
}

#[test]
fn cli_logging_flags_override_the_plan_file() {
    let file = write_plan(LISTINGS);
    let cfg = load_and_validate(file.path()).unwrap();

    let args = CliArgs::try_parse_from([
        "cmdplan",
        "--console-level",
        "output",
        "--log-file",
        "run.log",
        "--append",
    ])
    .unwrap();
    let opts = logging_options(&args, &cfg);
    assert_eq!(opts.console_level, Channel::Output);
    assert_eq!(opts.file_level, Channel::Output);
    assert_eq!(opts.file, Some(PathBuf::from("run.log")));
    assert_eq!(opts.file_mode, FileMode::Append);

    let args = CliArgs::try_parse_from(["cmdplan", "--no-log-file"]).unwrap();
    assert_eq!(logging_options(&args, &cfg).file, None);

    let args = CliArgs::try_parse_from(["cmdplan"]).unwrap();
    let opts = logging_options(&args, &cfg);
    assert_eq!(opts.file, Some(PathBuf::from("./Directory listings.log")));
    assert_eq!(opts.console_level, Channel::Statistic);
}
