// tests/messages.rs

use std::time::Duration;

use proptest::prelude::*;

use cmdplan::plan::ExecutionError;
use cmdplan::plan::messages::{
    command_message, end_message, failure_message, format_duration, index_width, start_message,
    summary_message,
};

#[test]
fn start_message_pads_to_the_command_count_width() {
    assert_eq!(start_message(1, 4, "List root dir"), "Cmd [1/4] List root dir...");
    assert_eq!(start_message(3, 10, "Third echo"), "Cmd [03/10] Third echo...");
    assert_eq!(start_message(7, 120, ""), "Cmd [007/120] ...");
}

#[test]
fn end_message_appends_label_and_duration() {
    let msg = end_message(2, 3, "Count root dirs", "OK", Duration::from_micros(1_234_567));
    assert_eq!(msg, "Cmd [2/3] Count root dirs...OK (0:00:01.234567)");

    let msg = end_message(3, 3, "Zonk", "FAILED", Duration::from_secs(2));
    assert_eq!(msg, "Cmd [3/3] Zonk...FAILED (0:00:02)");
}

#[test]
fn command_and_summary_messages() {
    assert_eq!(command_message("ls / | wc -l"), "Cmd: ls / | wc -l");
    assert_eq!(
        summary_message("Directory listings", "FAILED", Duration::from_millis(1500)),
        "Directory listings: FAILED, total time: 0:00:01.500000"
    );
}

#[test]
fn failure_message_embeds_the_error() {
    let err = ExecutionError {
        command: "ls /zonk".to_string(),
        exit_code: 2,
        std_err: "ls: cannot access '/zonk': No such file or directory".to_string(),
    };

    assert_eq!(
        failure_message(&err),
        "Bash command execution failed\nBash command: ls /zonk\nExit code: 2\nStd err: ls: cannot access '/zonk': No such file or directory"
    );
    assert_eq!(
        err.to_string(),
        "\nBash command: ls /zonk\nExit code: 2\nStd err: ls: cannot access '/zonk': No such file or directory"
    );
}

#[test]
fn durations_render_like_clock_time() {
    assert_eq!(format_duration(Duration::ZERO), "0:00:00");
    assert_eq!(format_duration(Duration::from_micros(1)), "0:00:00.000001");
    assert_eq!(format_duration(Duration::from_secs(59)), "0:00:59");
    assert_eq!(format_duration(Duration::from_secs(3_723)), "1:02:03");
    assert_eq!(format_duration(Duration::from_secs(36_000)), "10:00:00");
    assert_eq!(format_duration(Duration::from_secs(86_400 + 5)), "1 day, 0:00:05");
    assert_eq!(
        format_duration(Duration::from_secs(2 * 86_400) + Duration::from_micros(250_000)),
        "2 days, 0:00:00.250000"
    );
    // Sub-microsecond precision is dropped.
    assert_eq!(format_duration(Duration::from_nanos(999)), "0:00:00");
}

#[test]
fn width_is_digit_count() {
    assert_eq!(index_width(0), 1);
    assert_eq!(index_width(9), 1);
    assert_eq!(index_width(10), 2);
    assert_eq!(index_width(1000), 4);
}

proptest! {
    #[test]
    fn formatted_duration_round_trips_to_microseconds(micros in 0u64..(86_400u64 * 1_000_000)) {
        let text = format_duration(Duration::from_micros(micros));

        let (clock, fraction) = match text.split_once('.') {
            Some((c, f)) => (c.to_string(), f.parse::<u64>().unwrap()),
            None => (text.clone(), 0),
        };
        let parts: Vec<u64> = clock.split(':').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 3);

        let total = ((parts[0] * 60 + parts[1]) * 60 + parts[2]) * 1_000_000 + fraction;
        prop_assert_eq!(total, micros);
    }
}
