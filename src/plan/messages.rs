// src/plan/messages.rs

//! Exact text of every message a plan emits.
//!
//! These strings are a contract: tooling that tails the log may parse them,
//! so they are built here in one place and nowhere else.

use std::time::Duration;

use crate::plan::command::ExecutionError;

/// Result label appended when a command succeeded.
pub const RESULT_OK: &str = "OK";
/// Result label appended when a command failed.
pub const RESULT_FAILED: &str = "FAILED";
/// Prefix of the error-channel message for a failed command.
pub const FAILURE_PREFIX: &str = "Bash command execution failed";

/// Number of decimal digits in `count`, used as the zero-padding width.
pub fn index_width(count: usize) -> usize {
    count.to_string().len()
}

/// `Cmd [i/n] {description}...` with `i` and `n` zero-padded to the width of `n`.
pub fn start_message(index: usize, count: usize, description: &str) -> String {
    let width = index_width(count);
    format!("Cmd [{index:0width$}/{count:0width$}] {description}...")
}

/// Start message followed by `{label} ({duration})`.
pub fn end_message(
    index: usize,
    count: usize,
    description: &str,
    label: &str,
    duration: Duration,
) -> String {
    format!(
        "{}{label} ({})",
        start_message(index, count, description),
        format_duration(duration)
    )
}

pub fn command_message(text: &str) -> String {
    format!("Cmd: {text}")
}

pub fn failure_message(error: &ExecutionError) -> String {
    format!("{FAILURE_PREFIX}{error}")
}

pub fn summary_message(plan_name: &str, label: &str, total: Duration) -> String {
    format!("{plan_name}: {label}, total time: {}", format_duration(total))
}

/// Render elapsed time as `H:MM:SS[.ffffff]`.
///
/// Microseconds are shown only when non-zero, and spans of a day or more get
/// a `N day(s), ` prefix, e.g. `0:00:01.234567`, `1:02:03`, `2 days, 0:00:05`.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    let micros = duration.subsec_micros();

    let mut out = String::new();
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{days} {unit}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if micros > 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}
