//! Queue consumer: the pull side of the queue
//!
//! [`QueueStream`] drains entries one at a time. When the buffer is empty it
//! registers itself as the queue's single waiter and suspends until a push or
//! close hands it the next entry. Deferred values are awaited in place, so
//! the consumer only ever sees resolved values.

use crate::queue::entry::Entry;
use crate::queue::error::{BoxError, QueueError, QueueResult};
use crate::queue::internal::{Next, Shared};
use futures::future::BoxFuture;
use futures::stream::{FusedStream, Stream, StreamExt};
use futures::ready;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

enum StreamState<T> {
    /// Next poll takes the head entry or registers as waiter
    Idle,
    /// Suspended on an empty buffer
    Waiting(oneshot::Receiver<Entry<T>>),
    /// Awaiting a deferred value taken from the head
    Resolving(BoxFuture<'static, Result<T, BoxError>>),
    /// Reached a sentinel; nothing more is ever yielded
    Done,
}

/// The single consumer of a [`PushQueue`](crate::queue::PushQueue)
///
/// Yields `Ok(value)` in push order, ends with `None` at the end marker, or
/// yields one `Err` carrying the accumulated failure and then ends. The
/// stream cannot be restarted.
///
/// # Example
///
/// ```rust
/// # use pushqueue::queue::api::{CloseOptions, PushQueue, QueueError};
/// # async fn example() {
/// let queue = PushQueue::new();
/// let mut stream = queue.stream().unwrap();
///
/// queue.push("page-1");
/// queue.close_with(CloseOptions::new().failure(QueueError::producer("HTTP 503")));
///
/// while let Some(result) = stream.next_value().await {
///     match result {
///         Ok(page) => println!("Received: {}", page),
///         Err(e) => eprintln!("Producer failed: {}", e),
///     }
/// }
/// # }
/// ```
pub struct QueueStream<T> {
    shared: Arc<Shared<T>>,
    state: StreamState<T>,
}

impl<T> QueueStream<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared,
            state: StreamState::Idle,
        }
    }

    /// Wait for the next value
    pub async fn next_value(&mut self) -> Option<QueueResult<T>> {
        self.next().await
    }

    /// Current depth of the underlying buffer
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn finish_with_failure(&mut self) -> QueueError {
        self.state = StreamState::Done;
        let failure = self.shared.lock().take_failure();
        failure.unwrap_or_else(|| QueueError::Internal {
            message: "error marker reached with no recorded failure".to_string(),
        })
    }
}

impl<T> Stream for QueueStream<T> {
    type Item = QueueResult<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            let entry = match &mut this.state {
                StreamState::Done => return Poll::Ready(None),
                StreamState::Idle => match this.shared.lock().next_or_wait() {
                    Next::Entry(entry) => entry,
                    Next::Wait(receiver) => {
                        this.state = StreamState::Waiting(receiver);
                        continue;
                    }
                },
                StreamState::Waiting(receiver) => {
                    let delivered = ready!(Pin::new(receiver).poll(cx));
                    this.state = StreamState::Idle;
                    match delivered {
                        Ok(entry) => entry,
                        // Waiter slot was cleared without a delivery; look again
                        Err(_) => continue,
                    }
                }
                StreamState::Resolving(future) => {
                    let resolved = ready!(future.as_mut().poll(cx));
                    return match resolved {
                        Ok(value) => {
                            this.state = StreamState::Idle;
                            Poll::Ready(Some(Ok(value)))
                        }
                        Err(err) => {
                            log::debug!("Pending value failed; ending consumption: {}", err);
                            this.state = StreamState::Done;
                            Poll::Ready(Some(Err(QueueError::pending_value(err))))
                        }
                    };
                }
            };

            match entry {
                Entry::Value(value) => return Poll::Ready(Some(Ok(value))),
                Entry::PendingValue(future) => {
                    this.state = StreamState::Resolving(future);
                }
                Entry::End => {
                    log::debug!("Consumer reached end marker");
                    this.state = StreamState::Done;
                    return Poll::Ready(None);
                }
                Entry::Error => {
                    let failure = this.finish_with_failure();
                    log::debug!("Consumer reached error marker: {}", failure);
                    return Poll::Ready(Some(Err(failure)));
                }
            }
        }
    }
}

// Never pin-projected: every field is moved or replaced through `&mut`
impl<T> Unpin for QueueStream<T> {}

impl<T> FusedStream for QueueStream<T> {
    fn is_terminated(&self) -> bool {
        matches!(self.state, StreamState::Done)
    }
}
