// src/exec/input.rs

//! FIFO of input lines waiting to be written to a child's stdin.

use std::collections::VecDeque;

/// Lines still to be written, consumed from the front.
///
/// Writes to a pipe may be partial, so the queue remembers how much of the
/// front line has already gone out. A line is only popped once every byte of
/// it (including its terminator) has been accepted.
#[derive(Debug, Default, Clone)]
pub struct PendingInput {
    lines: VecDeque<Vec<u8>>,
    offset: usize,
}

impl PendingInput {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| l.as_ref().as_bytes().to_vec())
                .filter(|l| !l.is_empty())
                .collect(),
            offset: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines not yet fully written.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Unwritten remainder of the front line.
    pub fn front(&self) -> Option<&[u8]> {
        self.lines.front().map(|line| &line[self.offset..])
    }

    /// Record that `written` bytes of the front line were accepted.
    ///
    /// Returns `true` when this completed the front line and it was popped.
    pub fn advance(&mut self, written: usize) -> bool {
        let Some(front) = self.lines.front() else {
            return false;
        };

        self.offset = (self.offset + written).min(front.len());
        if self.offset == front.len() {
            self.lines.pop_front();
            self.offset = 0;
            true
        } else {
            false
        }
    }

    /// Drop everything still queued.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset = 0;
    }
}
