//! TOML configuration file parsing and loading
//!
//! Configuration keys mirror the long command-line options in kebab-case.
//! Values given on the command line override values from the file.

use super::args::Args;
use crate::core::validation::{
    require_non_zero, validate_log_format, validate_log_level, ValidationError,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid(_))
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid(err) => Some(err.message()),
            _ => None,
        }
    }
}

/// Settings for the demo run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DemoConfig {
    pub pages: usize,
    pub page_size: usize,
    pub interval_ms: u64,
    pub fail_at_page: Option<usize>,
    pub stop_after: Option<usize>,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pages: 5,
            page_size: 20,
            interval_ms: 50,
            fail_at_page: None,
            stop_after: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_file: None,
            color: None,
        }
    }
}

impl DemoConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Build the effective configuration: file (if any), then CLI overrides
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line values over the current ones
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(pages) = args.pages {
            self.pages = pages;
        }
        if let Some(page_size) = args.page_size {
            self.page_size = page_size;
        }
        if let Some(interval_ms) = args.interval_ms {
            self.interval_ms = interval_ms;
        }
        if args.fail_at_page.is_some() {
            self.fail_at_page = args.fail_at_page;
        }
        if args.stop_after.is_some() {
            self.stop_after = args.stop_after;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = &args.log_format {
            self.log_format = format.clone();
        }
        if args.log_file.is_some() {
            self.log_file = args.log_file.clone();
        }
        if let Some(color) = args.color_choice() {
            self.color = Some(color);
        }
    }

    pub fn validate(&mut self) -> Result<(), ValidationError> {
        require_non_zero("pages", self.pages)?;
        require_non_zero("page-size", self.page_size)?;
        if let Some(page) = self.fail_at_page {
            require_non_zero("fail-at-page", page)?;
            if page > self.pages {
                return Err(ValidationError::new(&format!(
                    "'fail-at-page' ({}) must not exceed 'pages' ({})",
                    page, self.pages
                )));
            }
        }
        self.log_level = validate_log_level(&self.log_level)?;
        self.log_format = validate_log_format(&self.log_format)?;
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Buffered depth above which the consumer is reported as lagging
    pub fn lag_threshold(&self) -> usize {
        self.page_size.saturating_mul(2)
    }

    /// Total records the source produces when it does not fail
    pub fn total_records(&self) -> usize {
        self.pages * self.page_size
    }
}
