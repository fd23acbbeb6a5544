//! Logging system initialization.
//!
//! The terminal belongs to the UI, so logs go to a file through a
//! non-blocking writer.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// # Arguments
/// * `config` - Configuration holding the log level and file
///
/// # Returns
/// * `Result<WorkerGuard>` - Must be kept alive until exit so buffered
///   lines are flushed
///
/// # Details
/// Appends to the configured log file, creating its directory if needed.
/// An unparsable `log_level` falls back to `info`.
pub fn init_logging(config: &Config) -> Result<WorkerGuard> {
    let log_path = config.log_file_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(guard)
}
