// Strata - CAD Vault Version History Exporter
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

//! # Strata - CAD Vault Version History Exporter
//!
//! Strata is a batch export tool built in Rust that walks the
//! project/folder/file hierarchy of a CAD design vault and exports every
//! document version to a selection of interchange formats, idempotently
//! and with per-item failure isolation.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Walking** projects, folders, files and their version histories
//! - **Exporting** each document version to multiple formats, skipping
//!   outputs that already exist so re-runs are cheap
//! - **Recording** per-file metadata ledgers of processed versions
//! - **Aggregating** saved/skipped/errored counts across the whole batch
//!
//! ## Architecture
//!
//! Strata follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (walker, exporters, ledger, handle)
//! - [`adapters`] - Capability traits and the in-memory vault
//! - [`domain`] - Core domain types (context, counter, formats, errors)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging with run-scoped log files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use std::sync::Arc;
//! use strata::adapters::memory::manifest::load_vault;
//! use strata::core::orchestrator::execute_export;
//! use strata::domain::{ExportContext, ExportFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let vault = Arc::new(load_vault("vault.json")?);
//!
//!     let ctx = ExportContext::new(
//!         "export-out",
//!         ExportFormat::default_selection(),
//!         BTreeSet::from(["Alpha".to_string()]),
//!         vault.clone(),
//!     );
//!
//!     let counter = execute_export(&ctx, vault.as_ref())?;
//!     println!(
//!         "saved {} skipped {} errored {}",
//!         counter.saved, counter.skipped, counter.errored
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Idempotent Re-Runs
//!
//! Output paths are a pure function of (context, format, file version),
//! and every export checks for its output before opening a document.
//! Re-running a finished batch saves nothing, skips everything, and
//! never opens a single document. Failed items leave no output and are
//! re-attempted on the next run.
//!
//! ## Failure Isolation
//!
//! Every failure is caught at the smallest enclosing scope, logged with
//! full detail, and counted as `errored(1)`; siblings keep going. Only
//! an error escaping the top-level walk aborts a run.
//!
//! ## Logging
//!
//! Strata uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting export");
//! warn!(file = "Bracket", "No versions found");
//! error!(error = "disk full", "Export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
