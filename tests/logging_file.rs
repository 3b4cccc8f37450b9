// tests/logging_file.rs

use std::fs;

use tempfile::tempdir;
use tracing::level_filters::LevelFilter;

use cmdplan::logging::{LoggingOptions, destination_filter, init_logging};
use cmdplan::sink::{LogSink, SINK_TARGET, TracingSink};
use cmdplan::types::Channel;

#[test]
fn destination_filter_admits_channels_down_to_the_threshold() {
    let filter = destination_filter(Channel::Command, LevelFilter::OFF);

    for channel in Channel::ALL {
        let expected = channel <= Channel::Command;
        assert_eq!(
            filter.would_enable(SINK_TARGET, &channel.level()),
            expected,
            "channel {channel}"
        );
        assert_eq!(Channel::Command.admits(channel), expected);
    }

    // Diagnostics are governed separately.
    assert!(!filter.would_enable("cmdplan::exec::shell", &tracing::Level::ERROR));
}

#[test]
fn file_destination_receives_only_admitted_channels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("plan.log");

    init_logging(&LoggingOptions {
        console_level: Channel::Error,
        file: Some(path.clone()),
        file_level: Channel::Command,
        ..LoggingOptions::default()
    })
    .expect("subscriber installed");

    let sink = TracingSink;
    sink.log_error("error line");
    sink.log_statistic("statistic line");
    sink.log_command("command line");
    sink.log_output("output line");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("error line"));
    assert!(contents.contains("statistic line"));
    assert!(contents.contains("command line"));
    assert!(!contents.contains("output line"));
    // No level or target decoration, just timestamp and message.
    assert!(!contents.contains("WARN"));
    assert!(!contents.contains(SINK_TARGET));
}
