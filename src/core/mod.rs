//! Core business logic for Strata.
//!
//! This module contains the traversal-and-export orchestration engine:
//!
//! - [`sanitize`] - filesystem-safe, hash-disambiguated names
//! - [`paths`] - deterministic output path resolution
//! - [`document`] - the lazy open/close document handle
//! - [`sketches`] - recursive sketch-to-DXF export
//! - [`exporter`] - per-version multi-format export with skip-if-exists
//! - [`ledger`] - append-only per-file version metadata
//! - [`walker`] - the recursive project/folder/file/version walk
//! - [`orchestrator`] - the top-level run entry point
//!
//! # Export Workflow
//!
//! 1. **Select**: the walker visits each selected project's root folder
//! 2. **Recurse**: folders extend the output context; files expand to
//!    versions when configured
//! 3. **Decide**: each (version, format) resolves a deterministic path
//!    and skips if the output already exists — no document open needed
//! 4. **Export**: the first format that needs work opens the document
//!    lazily; sketches and the metadata ledger piggyback on the visit
//! 5. **Isolate**: failures are logged and counted at the smallest
//!    enclosing scope and never abort siblings
//! 6. **Aggregate**: every level returns one counter; parents merge

pub mod document;
pub mod exporter;
pub mod ledger;
pub mod orchestrator;
pub mod paths;
pub mod sanitize;
pub mod sketches;
pub mod walker;

pub use document::LazyDocument;
pub use orchestrator::execute_export;
pub use sanitize::sanitize_filename;
