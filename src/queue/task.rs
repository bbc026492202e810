//! Binding a producer task to a queue
//!
//! A bound task closes the queue when it settles: with its failure if it
//! returned an error, panicked or was cancelled, and gracefully otherwise.
//! The second close after a failure is a no-op.

use crate::queue::error::{BoxError, QueueError, QueueResult};
use crate::queue::publisher::PushQueue;
use crate::queue::types::CloseOptions;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

impl<T> PushQueue<T>
where
    T: Send + 'static,
{
    /// Create a queue bound to a producer task
    ///
    /// The task is spawned on the current tokio runtime. Fails with
    /// [`QueueError::NoRuntime`] outside a runtime.
    pub fn with_producer<F, E>(task: F) -> QueueResult<Self>
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        let runtime = current_runtime()?;
        let queue = Self::new();
        let handle = runtime.spawn(task);
        queue.supervise(&runtime, handle);
        Ok(queue)
    }

    /// Create a queue and spawn a producer that pushes into it
    ///
    /// # Example
    ///
    /// ```rust
    /// # use pushqueue::queue::api::PushQueue;
    /// # use futures::TryStreamExt;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let queue = PushQueue::spawn(|producer| async move {
    ///     for page in 1..=3 {
    ///         producer.push(page);
    ///     }
    ///     Ok::<(), std::io::Error>(())
    /// })?;
    ///
    /// let pages: Vec<u32> = queue.stream()?.try_collect().await?;
    /// assert_eq!(pages, vec![1, 2, 3]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn<P, F, E>(producer: P) -> QueueResult<Self>
    where
        P: FnOnce(PushQueue<T>) -> F,
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        let runtime = current_runtime()?;
        let queue = Self::new();
        let handle = runtime.spawn(producer(queue.clone()));
        queue.supervise(&runtime, handle);
        Ok(queue)
    }

    /// Bind an already spawned producer task to this queue
    pub fn bind_task<E>(&self, task: JoinHandle<Result<(), E>>) -> QueueResult<()>
    where
        E: Into<BoxError> + Send + 'static,
    {
        let runtime = current_runtime()?;
        self.supervise(&runtime, task);
        Ok(())
    }

    fn supervise<E>(&self, runtime: &Handle, task: JoinHandle<Result<(), E>>)
    where
        E: Into<BoxError> + Send + 'static,
    {
        let queue = self.clone();
        runtime.spawn(async move {
            let failure = match task.await {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(QueueError::producer(err)),
                Err(join_err) => Some(QueueError::ProducerTask {
                    message: join_err.to_string(),
                }),
            };

            if let Some(failure) = failure {
                log::debug!("Producer task failed: {}", failure);
                queue.close_with(CloseOptions::new().failure(failure));
            } else {
                log::debug!("Producer task completed");
            }
            queue.close();
        });
    }
}

fn current_runtime() -> QueueResult<Handle> {
    Handle::try_current().map_err(|_| QueueError::NoRuntime)
}
