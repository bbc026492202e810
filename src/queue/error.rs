//! Queue Error Types
//!
//! Every failure a consumer can observe funnels through [`QueueError`].
//! Failures reported while the queue is live are merged with
//! [`QueueError::merge`]: the first one is kept as-is, later ones turn the
//! state into an [`QueueError::Aggregate`] holding all of them in report order.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Boxed error accepted from producers and pending values
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Shared error source, cheap to clone
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum QueueError {
    #[error("enqueue called with no values")]
    EmptyEnqueue,

    #[error("Producer failed: {source}")]
    Producer { source: SharedError },

    #[error("Producer task did not complete: {message}")]
    ProducerTask { message: String },

    #[error("Pending value failed: {source}")]
    PendingValue { source: SharedError },

    #[error("{}", AggregateDisplay(.0))]
    Aggregate(Vec<QueueError>),

    #[error("Queue already has a consumer")]
    ConsumerTaken,

    #[error("No tokio runtime available to drive the producer task")]
    NoRuntime,

    #[error("Internal queue error: {message}")]
    Internal { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

impl QueueError {
    /// Wrap an arbitrary producer-side error
    pub fn producer<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        QueueError::Producer {
            source: Arc::from(err.into()),
        }
    }

    pub(crate) fn pending_value(err: BoxError) -> Self {
        QueueError::PendingValue {
            source: Arc::from(err),
        }
    }

    /// Merge `next` into an optional prior failure
    ///
    /// - no prior failure: `next` becomes the failure
    /// - prior aggregate: `next` is appended to its members
    /// - prior single failure: a new aggregate `[prior, next]`
    pub fn merge(prior: Option<QueueError>, next: QueueError) -> QueueError {
        match prior {
            None => next,
            Some(QueueError::Aggregate(mut members)) => {
                members.push(next);
                QueueError::Aggregate(members)
            }
            Some(single) => QueueError::Aggregate(vec![single, next]),
        }
    }

    /// True for a compound failure
    pub fn is_aggregate(&self) -> bool {
        matches!(self, QueueError::Aggregate(_))
    }

    /// The individual failures, in report order
    ///
    /// A single failure yields itself; an aggregate yields its members.
    pub fn failures(&self) -> &[QueueError] {
        match self {
            QueueError::Aggregate(members) => members,
            single => std::slice::from_ref(single),
        }
    }

    /// Number of failures this error represents
    pub fn failure_count(&self) -> usize {
        self.failures().len()
    }
}

struct AggregateDisplay<'a>(&'a [QueueError]);

impl fmt::Display for AggregateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failures:", self.0.len())?;
        for (index, failure) in self.0.iter().enumerate() {
            write!(f, " [{}] {}", index + 1, failure)?;
        }
        Ok(())
    }
}

impl crate::core::error_handling::ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, QueueError::EmptyEnqueue | QueueError::ConsumerTaken)
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::EmptyEnqueue => Some("enqueue called with no values"),
            QueueError::ConsumerTaken => {
                Some("The queue supports a single consumer; stream() was called twice")
            }
            _ => None,
        }
    }
}
