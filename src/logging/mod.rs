//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output for interactive use
//! - A run-scoped, timestamped log file written into the export output
//!   directory, so each batch run is auditable after the fact
//!
//! # Example
//!
//! ```no_run
//! use strata::logging::init_logging;
//!
//! let _guard = init_logging("info", None).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Export started");
//! tracing::error!(error = "something went wrong", "Export error");
//! ```

pub mod structured;

pub use structured::{init_logging, run_log_path, LoggingGuard};
