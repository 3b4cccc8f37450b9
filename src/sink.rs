// src/sink.rs

//! The leveled logging capability plans and executors write to.
//!
//! The core only needs four named channels that preserve call order; how
//! they are filtered and where they end up is the backend's business. The
//! production backend is [`TracingSink`], which turns every call into a
//! `tracing` event that [`crate::logging`] routes to the console and the log
//! file. Tests use a recording implementation instead.

use std::fmt::Debug;

use tracing::{debug, error, info, warn};

use crate::types::Channel;

/// Tracing target used for every sink event.
///
/// Destination filters key on this target so that crate-internal
/// diagnostics can be filtered separately from plan output.
pub const SINK_TARGET: &str = "cmdplan::sink";

/// Four independently-leveled message channels, highest priority first.
pub trait LogSink: Send + Sync + Debug {
    fn log(&self, channel: Channel, message: &str);

    fn log_error(&self, message: &str) {
        self.log(Channel::Error, message);
    }

    fn log_statistic(&self, message: &str) {
        self.log(Channel::Statistic, message);
    }

    fn log_command(&self, message: &str) {
        self.log(Channel::Command, message);
    }

    fn log_output(&self, message: &str) {
        self.log(Channel::Output, message);
    }
}

/// Sink backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, channel: Channel, message: &str) {
        match channel {
            Channel::Error => error!(target: SINK_TARGET, "{message}"),
            Channel::Statistic => warn!(target: SINK_TARGET, "{message}"),
            Channel::Command => info!(target: SINK_TARGET, "{message}"),
            Channel::Output => debug!(target: SINK_TARGET, "{message}"),
        }
    }
}
