//! Logging configuration for moodmap

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_FILE_PREFIX: &str = "moodmap.log";

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},moodmap={level}")))
}

/// Initialize logging to stderr and a daily-rolling file in `directory`
pub fn init_logging_to(directory: &str, level: &str) -> Result<()> {
    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(directory);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(filter_for(level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::MoodMapError::Custom(format!("logging already initialized: {e}")))?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    tracing::info!(
        "Log files will be saved to: {}/{}.YYYY-MM-DD",
        directory,
        LOG_FILE_PREFIX
    );

    // The guard flushes the file writer on drop; keep it for the process lifetime
    std::mem::forget(guard);

    Ok(())
}

/// Initialize stderr-only logging for interactive commands
pub fn init_simple_logging(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| crate::MoodMapError::Custom(format!("logging already initialized: {e}")))?;

    Ok(())
}
