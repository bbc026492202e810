//! Internal queue state shared by the producer handles and the consumer
//!
//! This module provides the core queue functionality with:
//! - FIFO buffer of entries, with immediate-close sentinels jumping to the head
//! - Single waiter slot for direct handoff to a suspended consumer
//! - Failure aggregation and the closed flag
//!
//! All mutation happens under one mutex owned by [`Shared`]. None of the
//! operations here await, so the lock is never held across a suspension point.

use crate::core::sync::lock_or_recover;
use crate::queue::entry::{Entry, Item, Sentinel};
use crate::queue::error::QueueError;
use crate::queue::types::{CloseOptions, QueueStats};
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

/// What the consumer gets when it asks for the next entry
pub(crate) enum Next<T> {
    /// Head entry, already removed from the buffer
    Entry(Entry<T>),
    /// Buffer was empty; the sender half is now the registered waiter
    Wait(oneshot::Receiver<Entry<T>>),
}

#[derive(Debug)]
pub(crate) struct QueueState<T> {
    buffer: VecDeque<Entry<T>>,
    /// At most one consumer may be suspended at a time
    waiter: Option<oneshot::Sender<Entry<T>>>,
    failure: Option<QueueError>,
    closed: bool,
    consumer_taken: bool,
}

impl<T> QueueState<T> {
    pub(crate) fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            waiter: None,
            failure: None,
            closed: false,
            consumer_taken: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn record_failure(&mut self, err: QueueError) {
        self.failure = Some(QueueError::merge(self.failure.take(), err));
    }

    /// Append values at the tail, then hand the head to a waiting consumer
    ///
    /// An empty batch is itself a failure: it is recorded and an error
    /// marker is appended, but the queue stays open.
    ///
    /// Returns the items rejected because the queue is closed, so the caller
    /// drops them after releasing the lock.
    #[must_use]
    pub(crate) fn enqueue(&mut self, items: Vec<Item<T>>) -> Vec<Item<T>> {
        if self.closed {
            log::trace!("Ignoring enqueue of {} value(s) after close", items.len());
            return items;
        }

        if items.is_empty() {
            log::warn!("enqueue called with no values; recording failure");
            self.record_failure(QueueError::EmptyEnqueue);
            self.buffer.push_back(Entry::Error);
        } else {
            self.buffer.extend(items.into_iter().map(Entry::from));
        }

        self.hand_off();
        Vec::new()
    }

    /// Place the termination sentinel and mark the queue closed
    ///
    /// Returns false when the queue was already closed (no-op).
    pub(crate) fn close(&mut self, options: CloseOptions) -> bool {
        if self.closed {
            log::trace!("Ignoring close on an already closed queue");
            return false;
        }

        let CloseOptions { immediate, failure } = options;
        if let Some(err) = failure {
            self.record_failure(err);
        }

        let sentinel = if self.failure.is_some() {
            Sentinel::Error
        } else {
            Sentinel::End
        };

        if immediate {
            self.buffer.push_front(sentinel.into());
        } else {
            self.buffer.push_back(sentinel.into());
        }
        self.closed = true;

        log::debug!(
            "Queue closed ({:?}, immediate: {}, buffered: {})",
            sentinel,
            immediate,
            self.buffer.len()
        );

        self.hand_off();
        true
    }

    /// Deliver the head entry to the waiting consumer, if there is one
    ///
    /// Removing the entry and resolving the waiter happen under the same
    /// lock. If the consumer went away while waiting the entry goes back to
    /// the head, so nothing is lost or delivered twice.
    fn hand_off(&mut self) {
        let Some(waiter) = self.waiter.take() else {
            return;
        };
        let Some(entry) = self.buffer.pop_front() else {
            self.waiter = Some(waiter);
            return;
        };

        log::trace!("Handing {:?} directly to waiting consumer", entry);
        if let Err(entry) = waiter.send(entry) {
            log::trace!("Waiting consumer is gone; returning {:?} to buffer", entry);
            self.buffer.push_front(entry);
        }
    }

    /// Take the head entry or register the consumer as the waiter
    pub(crate) fn next_or_wait(&mut self) -> Next<T> {
        if let Some(entry) = self.buffer.pop_front() {
            return Next::Entry(entry);
        }

        let (sender, receiver) = oneshot::channel();
        if self.waiter.replace(sender).is_some() {
            log::warn!("Replaced an outstanding waiter; only one consumer may wait at a time");
        }
        log::trace!("Buffer empty; consumer registered as waiter");
        Next::Wait(receiver)
    }

    /// The accumulated failure, handed out once
    pub(crate) fn take_failure(&mut self) -> Option<QueueError> {
        self.failure.take()
    }

    /// Claim the single consumer slot
    pub(crate) fn claim_consumer(&mut self) -> bool {
        !std::mem::replace(&mut self.consumer_taken, true)
    }

    pub(crate) fn stats(&self) -> QueueStats {
        let mut stats = QueueStats {
            buffered_values: 0,
            pending_values: 0,
            sentinels: 0,
            head_sentinel: self.buffer.front().and_then(Entry::sentinel),
            closed: self.closed,
            consumer_waiting: self
                .waiter
                .as_ref()
                .is_some_and(|waiter| !waiter.is_closed()),
            failure_count: self.failure.as_ref().map_or(0, QueueError::failure_count),
        };

        for entry in &self.buffer {
            match entry {
                Entry::Value(_) => stats.buffered_values += 1,
                Entry::PendingValue(_) => stats.pending_values += 1,
                Entry::End | Entry::Error => stats.sentinels += 1,
            }
        }

        stats
    }
}

/// State shared between every [`PushQueue`](crate::queue::PushQueue) clone
/// and the [`QueueStream`](crate::queue::QueueStream)
#[derive(Debug)]
pub(crate) struct Shared<T> {
    state: Mutex<QueueState<T>>,
    /// Live producer handles; the stream does not count
    pub(crate) handles: AtomicUsize,
}

impl<T> Shared<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::new()),
            handles: AtomicUsize::new(1),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        lock_or_recover(&self.state, "push queue state")
    }
}
