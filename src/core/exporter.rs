//! Multi-format file export
//!
//! Exports one document version to one requested format. The
//! skip-if-exists short circuit runs before the document is opened, so a
//! fully exported file is revisited without paying the open cost — this
//! is the primary reason a run is idempotent and cheap to repeat.

use crate::adapters::catalog::DataFile;
use crate::core::document::LazyDocument;
use crate::core::paths::export_path;
use crate::domain::{Counter, ExportContext, ExportFormat, Result};
use std::fs;

/// Exports `file` to `format` under the context's folder.
///
/// Returns `skipped(1)` without opening the document when the output
/// already exists. Otherwise opens the handle (lazily — only the first
/// format that actually exports pays for the open), creates parent
/// directories, dispatches to the format-specific export constructor and
/// returns `saved(1)`.
///
/// # Errors
///
/// Export failures propagate to the caller; the tree walker attributes
/// them as `errored(1)` per format and moves on. The format dispatch is
/// an exhaustive match, so an unsupported format is unrepresentable
/// rather than a runtime error.
pub fn export_file(
    ctx: &ExportContext,
    format: ExportFormat,
    file: &dyn DataFile,
    document: &mut LazyDocument<'_>,
) -> Result<Counter> {
    let output_path = export_path(ctx, format, file);

    if output_path.exists() {
        tracing::debug!(
            path = %output_path.display(),
            "Output already exists, skipping"
        );
        return Ok(Counter::skipped(1));
    }

    document.open()?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let manager = document.export_manager()?;
    match format {
        ExportFormat::F3d => manager.export_archive(&output_path)?,
        ExportFormat::Step => manager.export_step(&output_path)?,
        ExportFormat::Stl => {
            let root = document.root_component()?;
            manager.export_stl(root.as_ref(), &output_path)?;
        }
        ExportFormat::Iges => manager.export_iges(&output_path)?,
        ExportFormat::Sat => manager.export_sat(&output_path)?,
        ExportFormat::Smt => manager.export_smt(&output_path)?,
    }

    tracing::info!(path = %output_path.display(), "Saved export");
    Ok(Counter::saved(1))
}
