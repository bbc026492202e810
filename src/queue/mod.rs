//! Push-to-Pull Queue Component
//!
//! A bridge between producers that emit values synchronously (callbacks,
//! event handlers, timers) and a single consumer that pulls them through an
//! asynchronous stream.
//!
//! # Overview
//!
//! - **Buffer**: FIFO sequence of values, deferred values and termination markers
//! - **Waiter handoff**: a consumer suspended on an empty buffer receives the
//!   next entry directly from the push that produced it
//! - **Termination**: `close` places an end or error marker; consumption stops
//!   when it reaches the first marker. Immediate close puts the marker at the
//!   head, ahead of values not yet consumed
//! - **Error aggregation**: the first failure is kept as-is, later ones are
//!   collected into one compound failure, raised to the consumer once
//!
//! Producers are never blocked. The buffer is unbounded; callers that need
//! backpressure throttle themselves using [`PushQueue::len`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ push/close  ┌───────────────────────────────────┐
//! │  callback A  │────────────▶│        Shared (one mutex)         │
//! └──────────────┘             │  ┌───┬───┬───┬─────┬─────┐        │
//! ┌──────────────┐ push        │  │ 1 │ 2 │ ⧗ │ ... │ END │ buffer │
//! │  callback B  │────────────▶│  └───┴───┴───┴─────┴─────┘        │
//! └──────────────┘             │  waiter: Option<oneshot::Sender>  │
//! ┌──────────────┐ settle      │  failure: Option<QueueError>      │
//! │ producer task│────────────▶│  closed: bool                     │
//! └──────────────┘             └─────────────────┬─────────────────┘
//!                                                │ poll_next / handoff
//!                                       ┌────────┴────────┐
//!                                       │   QueueStream   │ (single consumer)
//!                                       └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pushqueue::queue::api::{CloseOptions, PushQueue};
//! use futures::StreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue: PushQueue<String> = PushQueue::new();
//! let mut stream = queue.stream()?;
//!
//! // Producer side: push from a callback
//! let producer = queue.clone();
//! let on_event = move |line: &str| producer.push(line.to_string());
//! on_event("first");
//! on_event("second");
//! queue.close_with(CloseOptions::new());
//!
//! // Consumer side: pull sequentially
//! while let Some(line) = stream.next().await {
//!     println!("Received: {}", line?);
//! }
//! # Ok(())
//! # }
//! ```

mod consumer;
mod entry;
mod error;
mod internal;
mod publisher;
mod task;
mod types;

pub mod api;

pub use consumer::QueueStream;
pub use entry::{Item, Sentinel};
pub use error::{BoxError, QueueError, QueueResult, SharedError};
pub use publisher::PushQueue;
pub use types::{CloseOptions, QueueStats};

#[cfg(test)]
mod tests;
