use std::sync::{Arc, Mutex};

use cmdplan::sink::LogSink;
use cmdplan::types::Channel;

/// A sink that remembers every message, in call order.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the plan.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<(Channel, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(channel, message)` pairs so far.
    pub fn entries(&self) -> Vec<(Channel, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages logged on one channel, in order.
    pub fn messages(&self, channel: Channel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// What a destination with the given threshold would have shown.
    pub fn visible_at(&self, threshold: Channel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| threshold.admits(*c))
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, channel: Channel, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((channel, message.to_string()));
    }
}
