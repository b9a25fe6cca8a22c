//! Structured logging setup using tracing
//!
//! Console output always; optionally a run-scoped log file inside the
//! export output directory, named by timestamp, so every batch run
//! leaves its own complete log next to the artifacts it produced.

use crate::domain::{Result, StrataError};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Computes the run-scoped log file path for an output directory:
/// `<directory>/strata_<YYYY_MM_DD_HH_MM>.log`.
pub fn run_log_path(directory: &Path) -> PathBuf {
    directory.join(format!(
        "strata_{}.log",
        Local::now().format("%Y_%m_%d_%H_%M")
    ))
}

/// Initialize the logging system
///
/// Sets up a console layer and, when `run_log` is given, a plain-text
/// file layer writing to that path. The file's parent directory must
/// already exist (the export command creates the output directory before
/// initializing logging).
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `run_log` - Optional path of the run-scoped log file
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the run
///
/// # Errors
///
/// Returns an error if the level string is invalid, the log file cannot
/// be set up, or a global subscriber is already installed.
pub fn init_logging(log_level_str: &str, run_log: Option<&Path>) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strata={log_level}")));

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter.clone());

    layers.push(console_layer.boxed());

    let file_guard = if let Some(path) = run_log {
        let directory = path.parent().ok_or_else(|| {
            StrataError::Configuration(format!(
                "Run log path {} has no parent directory",
                path.display()
            ))
        })?;
        let file_name = path.file_name().ok_or_else(|| {
            StrataError::Configuration(format!(
                "Run log path {} has no file name",
                path.display()
            ))
        })?;

        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(env_filter);

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| {
            StrataError::Configuration(format!("Failed to initialize logging: {e}"))
        })?;

    Ok(LoggingGuard::new(file_guard))
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(StrataError::Configuration(format!(
            "Invalid log level '{other}'. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_accepts_all_levels() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_is_case_insensitive() {
        assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_rejects_unknown() {
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_run_log_path_is_timestamped() {
        let path = run_log_path(Path::new("/tmp/out"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("strata_"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent().unwrap(), Path::new("/tmp/out"));
    }
}
