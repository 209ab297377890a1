//! Logging system initialization
//!
//! Sets up `tracing` from the `[logging]` section of the configuration.

use std::fs::OpenOptions;
use std::io::Write;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{LinkvaultError, Result};

/// Initialize logging system based on configuration
///
/// Output goes to stdout unless `logging.file` names a file, which is
/// opened in append mode. ANSI colours are only used on the console.
///
/// Call once at startup. The returned guard must be kept alive for the
/// program's lifetime so buffered records are flushed on exit.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn Write + Send + Sync> = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    LinkvaultError::file_operation(format!(
                        "Failed to open log file {}: {}",
                        path, e
                    ))
                })?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        LinkvaultError::config(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| LinkvaultError::config(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}
