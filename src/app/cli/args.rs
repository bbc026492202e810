//! Command-line arguments for the demo binary
//!
//! Every option is optional on the command line; unset options fall back
//! to the configuration file, then to built-in defaults.

use crate::core::validation::validate_positive_int;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pushqueue-demo")]
#[command(about = "Drain a simulated paginated source through a push-to-pull queue")]
#[command(version)]
pub struct Args {
    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of pages the simulated source produces
    #[arg(long = "pages", value_name = "N", value_parser = validate_positive_int)]
    pub pages: Option<usize>,

    /// Records per page
    #[arg(long = "page-size", value_name = "N", value_parser = validate_positive_int)]
    pub page_size: Option<usize>,

    /// Delay between pages in milliseconds
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Make the source fail when it reaches this page
    #[arg(long = "fail-at-page", value_name = "PAGE")]
    pub fail_at_page: Option<usize>,

    /// Cancel with an immediate close after consuming this many records
    #[arg(long = "stop-after", value_name = "N")]
    pub stop_after: Option<usize>,

    /// Log level
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,
}

impl Args {
    /// Color preference from the flags: Some(true), Some(false) or None (auto)
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
