//! Validation utilities for CLI arguments and configuration values

/// A configuration or argument value that failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate that a named setting is non-zero
pub fn require_non_zero(name: &str, value: usize) -> Result<usize, ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(&format!(
            "'{}' must be greater than 0",
            name
        )));
    }
    Ok(value)
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<String, ValidationError> {
    let normalized = level.to_lowercase();
    match normalized.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(normalized),
        _ => Err(ValidationError::new(&format!(
            "Invalid log level '{}': expected trace, debug, info, warn, error or off",
            level
        ))),
    }
}

/// Validate a log format name
pub fn validate_log_format(format: &str) -> Result<String, ValidationError> {
    match format {
        "text" | "ext" | "json" => Ok(format.to_string()),
        _ => Err(ValidationError::new(&format!(
            "Invalid log format '{}': expected text, ext or json",
            format
        ))),
    }
}
