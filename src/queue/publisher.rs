//! Producer-side handle for pushing values into a queue
//!
//! A [`PushQueue`] is cheap to clone; every clone addresses the same buffer.
//! Producers keep clones inside callbacks or event handlers and push
//! synchronously, while a single [`QueueStream`] drains the values.

use crate::queue::consumer::QueueStream;
use crate::queue::entry::Item;
use crate::queue::error::{BoxError, QueueError, QueueResult};
use crate::queue::internal::Shared;
use crate::queue::types::{CloseOptions, QueueStats};
use std::fmt;
use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Handle for pushing values into a push-to-pull queue
///
/// Pushing and closing never block or await. Once the queue is closed,
/// further pushes and closes are ignored. Dropping the last handle closes
/// the queue gracefully.
///
/// # Example
///
/// ```rust
/// # use pushqueue::queue::api::PushQueue;
/// # use futures::TryStreamExt;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = PushQueue::new();
/// let stream = queue.stream()?;
///
/// // Push from anywhere, e.g. inside a callback
/// queue.push(1);
/// queue.push(2);
/// queue.close();
///
/// let values: Vec<i32> = stream.try_collect().await?;
/// assert_eq!(values, vec![1, 2]);
/// # Ok(())
/// # }
/// ```
pub struct PushQueue<T> {
    pub(crate) shared: Arc<Shared<T>>,
}

impl<T> PushQueue<T> {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
        }
    }

    /// Append values at the tail of the buffer
    ///
    /// If the consumer is waiting, the head entry is handed to it directly.
    /// Calling this with no values records [`QueueError::EmptyEnqueue`] and
    /// appends an error marker; the queue itself stays open.
    pub fn enqueue<I>(&self, values: I)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        let items: Vec<Item<T>> = values.into_iter().collect();
        // Rejected items may hold queue handles; drop them unlocked
        let rejected = self.shared.lock().enqueue(items);
        drop(rejected);
    }

    /// Push one ready value
    pub fn push(&self, value: T) {
        self.enqueue([Item::Ready(value)]);
    }

    /// Push a value that is not ready yet; the consumer awaits it in order
    pub fn push_future<F>(&self, future: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: 'static,
    {
        self.enqueue([Item::pending(future)]);
    }

    /// Push a fallible deferred value; its error ends consumption
    pub fn push_try_future<F, E>(&self, future: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        self.enqueue([Item::try_pending(future)]);
    }

    /// Close gracefully: values already pushed are still consumed
    pub fn close(&self) {
        self.close_with(CloseOptions::new());
    }

    /// Close with options
    ///
    /// With `immediate` set, the termination marker jumps ahead of values
    /// not yet consumed. With a `failure`, consumption ends by raising the
    /// accumulated failure once the marker is reached.
    pub fn close_with(&self, options: CloseOptions) {
        self.shared.lock().close(options);
    }

    /// Close with a producer failure
    pub fn fail<E>(&self, err: E)
    where
        E: Into<BoxError>,
    {
        self.close_with(CloseOptions::new().failure(QueueError::producer(err)));
    }

    /// Record a failure without closing
    ///
    /// Remains effective after close: a failure recorded before the consumer
    /// reaches the error marker is raised together with earlier ones.
    pub fn record_failure(&self, err: QueueError) {
        self.shared.lock().record_failure(err);
    }

    /// Current buffer depth, sentinels included
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().is_closed()
    }

    pub fn stats(&self) -> QueueStats {
        self.shared.lock().stats()
    }

    /// Take the consumer side of the queue
    ///
    /// Only one consumer may exist per queue; a second call fails with
    /// [`QueueError::ConsumerTaken`].
    pub fn stream(&self) -> QueueResult<QueueStream<T>> {
        if !self.shared.lock().claim_consumer() {
            return Err(QueueError::ConsumerTaken);
        }
        Ok(QueueStream::new(Arc::clone(&self.shared)))
    }
}

impl<T> Default for PushQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PushQueue<T> {
    fn clone(&self) -> Self {
        self.shared.handles.fetch_add(1, Ordering::Relaxed);
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for PushQueue<T> {
    fn drop(&mut self) {
        if self.shared.handles.fetch_sub(1, Ordering::AcqRel) == 1 {
            let mut state = self.shared.lock();
            if !state.is_closed() {
                log::debug!("Last queue handle dropped; closing");
                state.close(CloseOptions::new());
            }
        }
    }
}

impl<T> fmt::Debug for PushQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushQueue")
            .field("stats", &self.stats())
            .finish()
    }
}
