#![allow(dead_code)]

pub use cmdplan_test_utils::{FakeExecutor, PlanBuilder, RecordingSink, init_tracing, with_timeout};

/// Assert `message` is `{prefix}{label} ({duration})` with a well-formed
/// `H:MM:SS[.ffffff]` duration.
pub fn assert_end_line(message: &str, prefix: &str, label: &str) {
    let head = format!("{prefix}{label} (");
    assert!(
        message.starts_with(&head) && message.ends_with(')'),
        "unexpected end line: {message:?} (wanted {head:?}...)"
    );
    let duration = &message[head.len()..message.len() - 1];
    assert_duration_format(duration);
}

/// Assert `text` looks like `H:MM:SS` optionally followed by `.ffffff`.
pub fn assert_duration_format(text: &str) {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    assert_eq!(parts.len(), 3, "bad duration {text:?}");
    assert!(parts[0].parse::<u64>().is_ok(), "bad hours in {text:?}");
    assert_eq!(parts[1].len(), 2, "bad minutes in {text:?}");
    assert_eq!(parts[2].len(), 2, "bad seconds in {text:?}");
    assert!(parts[1].parse::<u8>().is_ok_and(|m| m < 60));
    assert!(parts[2].parse::<u8>().is_ok_and(|s| s < 60));

    if let Some(fraction) = fraction {
        assert_eq!(fraction.len(), 6, "bad fraction in {text:?}");
        assert!(fraction.chars().all(|c| c.is_ascii_digit()));
    }
}
