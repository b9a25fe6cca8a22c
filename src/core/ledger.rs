//! Metadata ledger
//!
//! One append-only text file per logical file (not per version) records
//! which versions have been processed, with their creation timestamps
//! and descriptions. Recording is idempotent on the version number.

use crate::adapters::catalog::DataFile;
use crate::core::paths::ledger_path;
use crate::domain::{Counter, ExportContext, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Records `file`'s version in its metadata ledger.
///
/// If the ledger file does not exist it is created empty, which counts
/// as `saved(1)`. If a trimmed line exactly matching `Version: {n}` is
/// already present the version counts as `skipped(1)`, keeping re-runs
/// accountable for every item they revisit. Otherwise the version block
/// is appended.
///
/// Appending to a pre-existing ledger deliberately produces no counter
/// change: only the creation of the ledger file is ever credited. Later
/// runs that append a new version line report neither saved nor skipped
/// for this step.
///
/// # Errors
///
/// Returns an error if the ledger cannot be created, read or appended.
pub fn record_version(ctx: &ExportContext, file: &dyn DataFile) -> Result<Counter> {
    let output_path = ledger_path(ctx, file);

    let mut counter = Counter::zero();
    if !output_path.exists() {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, "")?;
        tracing::info!(path = %output_path.display(), "Created metadata ledger");
        counter = Counter::saved(1);
    }

    let contents = fs::read_to_string(&output_path)?;
    let marker = format!("Version: {}", file.version_number());
    if contents.lines().any(|line| line.trim() == marker) {
        tracing::debug!(
            path = %output_path.display(),
            version = file.version_number(),
            "Version already recorded, skipping"
        );
        return Ok(counter.merge(Counter::skipped(1)));
    }

    let mut ledger = OpenOptions::new().append(true).open(&output_path)?;
    writeln!(ledger, "Version: {}", file.version_number())?;
    writeln!(ledger, "\tcreated: {}", file.created().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(ledger, "\tdescription: {}", file.description())?;
    writeln!(ledger)?;
    tracing::info!(path = %output_path.display(), "Updated metadata ledger");

    Ok(counter)
}
