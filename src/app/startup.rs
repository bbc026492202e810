//! Demo binary startup: arguments, configuration, logging, runtime

use super::cli::args::Args;
use super::cli::config::DemoConfig;
use super::demo::{run_demo, DemoSummary};
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

/// Run the demo binary and map its outcome to an exit code
pub fn startup() -> ExitCode {
    let args = Args::parse();

    let config = match DemoConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet
            match e.user_message() {
                Some(message) if e.is_user_actionable() => eprintln!("Error: {}", message),
                _ => eprintln!("Error: {}", e),
            }
            return ExitCode::FAILURE;
        }
    };

    let use_color = config
        .color
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let log_file = config
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        Some(config.log_level.as_str()),
        Some(config.log_format.as_str()),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::info!(
        "pushqueue-demo starting: {} pages of {} records",
        config.pages,
        config.page_size
    );
    log::debug!("Effective configuration: {:?}", config);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("FATAL: could not start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_demo(&config)) {
        Ok(summary) => report(&config, &summary),
        Err(e) => {
            log_error_with_context(&e, "Running demo");
            ExitCode::FAILURE
        }
    }
}

fn report(config: &DemoConfig, summary: &DemoSummary) -> ExitCode {
    match &summary.failure {
        None if summary.cancelled => {
            log::info!("Cancelled after {} records", summary.consumed);
            ExitCode::SUCCESS
        }
        None => {
            log::info!(
                "Consumed {}/{} records",
                summary.consumed,
                config.total_records()
            );
            ExitCode::SUCCESS
        }
        Some(failure) => {
            log_error_with_context(failure, "Draining paginated source");
            ExitCode::FAILURE
        }
    }
}
