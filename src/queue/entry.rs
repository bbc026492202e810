//! Buffer entries and the values producers hand to the queue

use crate::queue::error::BoxError;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

/// Termination markers that can sit in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Graceful end of the sequence
    End,
    /// Consumption stops by raising the accumulated failure
    Error,
}

/// A value as handed to [`PushQueue::enqueue`](crate::queue::PushQueue::enqueue)
///
/// Either a ready value or a deferred one that the consumer awaits when it
/// reaches it in the buffer.
pub enum Item<T> {
    Ready(T),
    Pending(BoxFuture<'static, Result<T, BoxError>>),
}

impl<T> Item<T> {
    pub fn ready(value: T) -> Self {
        Item::Ready(value)
    }

    /// A deferred value that cannot fail
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: 'static,
    {
        Item::Pending(future.map(Ok).boxed())
    }

    /// A deferred value whose failure terminates consumption
    pub fn try_pending<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Item::Pending(future.map(|result| result.map_err(Into::into)).boxed())
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Item::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// One slot of the queue buffer. Immutable once placed.
pub(crate) enum Entry<T> {
    Value(T),
    PendingValue(BoxFuture<'static, Result<T, BoxError>>),
    End,
    Error,
}

impl<T> Entry<T> {
    pub(crate) fn sentinel(&self) -> Option<Sentinel> {
        match self {
            Entry::End => Some(Sentinel::End),
            Entry::Error => Some(Sentinel::Error),
            Entry::Value(_) | Entry::PendingValue(_) => None,
        }
    }
}

impl<T> From<Item<T>> for Entry<T> {
    fn from(item: Item<T>) -> Self {
        match item {
            Item::Ready(value) => Entry::Value(value),
            Item::Pending(future) => Entry::PendingValue(future),
        }
    }
}

impl<T> From<Sentinel> for Entry<T> {
    fn from(sentinel: Sentinel) -> Self {
        match sentinel {
            Sentinel::End => Entry::End,
            Sentinel::Error => Entry::Error,
        }
    }
}

impl<T> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Value(_) => f.write_str("Value(..)"),
            Entry::PendingValue(_) => f.write_str("PendingValue(..)"),
            Entry::End => f.write_str("End"),
            Entry::Error => f.write_str("Error"),
        }
    }
}
