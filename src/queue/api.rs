//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Producer and consumer halves
pub use crate::queue::consumer::QueueStream;
pub use crate::queue::publisher::PushQueue;

// Values and termination markers
pub use crate::queue::entry::{Item, Sentinel};

// Error handling
pub use crate::queue::error::{BoxError, QueueError, QueueResult, SharedError};

// Type definitions and statistics
pub use crate::queue::types::{CloseOptions, QueueStats};
