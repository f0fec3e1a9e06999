//! Logging system initialization
//!
//! Sets up the `tracing` subscriber from the `[logging]` configuration
//! section. Console output goes to stderr so command output on stdout stays
//! clean.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{Result, TinylinkerError};

/// Initialize logging system based on configuration
///
/// **Note**: call once during startup, after the configuration is loaded.
///
/// # Returns
/// * `WorkerGuard` - must be kept alive for the duration of the program so
///   buffered log lines are flushed
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let to_console = config.file.as_deref().is_none_or(str::is_empty);

    let writer: Box<dyn std::io::Write + Send + Sync> = match config.file.as_deref() {
        Some(log_file) if !log_file.is_empty() && config.enable_rotation => {
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let prefix = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("tinylinker.log")
                .trim_end_matches(".log")
                .to_string();
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
                .map_err(|e| {
                    TinylinkerError::file_operation(format!(
                        "Failed to create rolling log appender: {}",
                        e
                    ))
                })?;
            Box::new(appender)
        }
        Some(log_file) if !log_file.is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Box::new(file)
        }
        _ => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| TinylinkerError::config(format!("Invalid log level filter: {}", e)))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let installed = match config.format {
        LogFormat::Json => subscriber_builder.json().try_init(),
        LogFormat::Text => subscriber_builder.try_init(),
    };
    installed.map_err(|e| TinylinkerError::config(format!("Logging already initialized: {}", e)))?;

    Ok(guard)
}
