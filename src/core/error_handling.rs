//! Generic error handling utilities
//!
//! Provides unified error handling that can work across different error types
//! while maintaining domain-specific error logging patterns.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`. When it returns `false`, `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific message the user can act on
    ///
    /// Examples: misuse of the queue API, invalid configuration values.
    /// Counter-examples: producer I/O failures, panicked tasks.
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// - User-actionable errors log their specific message
/// - System errors log the operation context, with details at debug level
///
/// # Examples
/// ```rust,no_run
/// # use pushqueue::core::error_handling::log_error_with_context;
/// # use pushqueue::queue::api::QueueError;
/// log_error_with_context(&QueueError::ConsumerTaken, "Starting consumer");
/// // Logs: "FATAL: The queue supports a single consumer; stream() was called twice"
///
/// log_error_with_context(&QueueError::producer("socket closed"), "Draining queue");
/// // Logs: "FATAL: Draining queue"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
