//! Type definitions for the queue system

use crate::queue::entry::Sentinel;
use crate::queue::error::QueueError;

/// Options for [`PushQueue::close_with`](crate::queue::PushQueue::close_with)
#[derive(Debug, Clone, Default)]
pub struct CloseOptions {
    /// Place the sentinel at the head, ahead of values not yet consumed
    pub immediate: bool,
    /// Failure to merge into the queue's accumulated failure
    pub failure: Option<QueueError>,
}

impl CloseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    pub fn failure(mut self, failure: QueueError) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Point-in-time statistics for a queue
///
/// Advisory only: producers may use the depth to throttle themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Ready values waiting in the buffer
    pub buffered_values: usize,
    /// Deferred values waiting in the buffer
    pub pending_values: usize,
    /// Termination markers in the buffer
    pub sentinels: usize,
    /// Sentinel at the head of the buffer, if any
    pub head_sentinel: Option<Sentinel>,
    /// Whether close has been called
    pub closed: bool,
    /// Whether the consumer is suspended waiting for an entry
    pub consumer_waiting: bool,
    /// Number of failures recorded and not yet raised
    pub failure_count: usize,
}

impl QueueStats {
    /// Total buffer depth, sentinels included
    pub fn depth(&self) -> usize {
        self.buffered_values + self.pending_values + self.sentinels
    }
}
