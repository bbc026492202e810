//! CLI TOML configuration tests
//!
//! Tests for loading configuration files and overriding them from the command line.

use clap::Parser;
use pushqueue::app::cli::args::Args;
use pushqueue::app::cli::config::{ConfigError, DemoConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_resolve_without_config_file_uses_defaults() {
    let args = Args::try_parse_from(["pushqueue-demo"]).unwrap();
    let config = DemoConfig::resolve(&args).unwrap();
    assert_eq!(config, DemoConfig::default());
}

#[test]
fn test_resolve_reads_config_file() {
    let file = config_file("pages = 2\npage-size = 3\nstop-after = 4\n");
    let path = file.path().to_string_lossy().into_owned();

    let args = Args::try_parse_from(["pushqueue-demo", "--config-file", &path]).unwrap();
    let config = DemoConfig::resolve(&args).unwrap();

    assert_eq!(config.pages, 2);
    assert_eq!(config.page_size, 3);
    assert_eq!(config.stop_after, Some(4));
}

#[test]
fn test_cli_value_overrides_config_file() {
    let file = config_file("pages = 2\nlog-format = \"json\"\n");
    let path = file.path().to_string_lossy().into_owned();

    let args = Args::try_parse_from([
        "pushqueue-demo",
        "--config-file",
        &path,
        "--pages",
        "9",
        "--log-format",
        "ext",
    ])
    .unwrap();
    let config = DemoConfig::resolve(&args).unwrap();

    assert_eq!(config.pages, 9);
    assert_eq!(config.log_format, "ext");
}

#[test]
fn test_invalid_config_value_is_rejected() {
    let file = config_file("page-size = 0\n");
    let path = file.path().to_string_lossy().into_owned();

    let args = Args::try_parse_from(["pushqueue-demo", "--config-file", &path]).unwrap();
    let err = DemoConfig::resolve(&args).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("page-size"));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let file = config_file("pages = [\n");
    let path = file.path().to_string_lossy().into_owned();

    let args = Args::try_parse_from(["pushqueue-demo", "--config-file", &path]).unwrap();
    let err = DemoConfig::resolve(&args).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
