//! Export orchestration entry point
//!
//! Thin top layer over the tree walker: makes sure the output directory
//! exists, runs the walk, reports the final counter. The run-scoped log
//! sink is initialized by the front-end before this is invoked, so the
//! core only ever logs through the already-installed tracing dispatcher.

use crate::adapters::catalog::ProjectCatalog;
use crate::core::walker;
use crate::domain::{Counter, ExportContext, Result};
use std::fs;

/// Executes a full export run and returns the merged counter.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or if an
/// error escapes the top level of the walk (per-item failures are
/// isolated and counted lower down).
pub fn execute_export(ctx: &ExportContext, catalog: &dyn ProjectCatalog) -> Result<Counter> {
    fs::create_dir_all(&ctx.folder)?;

    tracing::info!(
        folder = %ctx.folder.display(),
        formats = ?ctx.formats,
        projects = ?ctx.projects,
        unhide_all = ctx.unhide_all,
        save_sketches = ctx.save_sketches,
        save_all_versions = ctx.save_all_versions,
        "Starting export run"
    );

    let counter = walker::run(ctx, catalog)?;

    tracing::info!(
        saved = counter.saved,
        skipped = counter.skipped,
        errored = counter.errored,
        "Export run completed"
    );

    Ok(counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FileNode, FolderNode, MemoryVault, ProjectNode};
    use crate::domain::ExportFormat;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[test]
    fn test_execute_export_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/output");
        let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
            "P",
            FolderNode::new("P")
                .with_file(FileNode::new("Model", "f3d").with_version(1, "first pass")),
        )]));
        let ctx = ExportContext::new(
            &output,
            vec![ExportFormat::F3d],
            BTreeSet::from(["P".to_string()]),
            vault.clone(),
        );

        let counter = execute_export(&ctx, vault.as_ref()).unwrap();

        assert!(output.is_dir());
        assert_eq!(counter.saved, 2); // export + ledger creation
        assert_eq!(counter.errored, 0);
    }

    #[test]
    fn test_execute_export_with_no_matching_projects_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
            "P",
            FolderNode::new("P")
                .with_file(FileNode::new("Model", "f3d").with_version(1, "first pass")),
        )]));
        let ctx = ExportContext::new(
            dir.path(),
            vec![ExportFormat::F3d],
            BTreeSet::from(["Nope".to_string()]),
            vault.clone(),
        );

        let counter = execute_export(&ctx, vault.as_ref()).unwrap();
        assert_eq!(counter, Counter::zero());
    }
}
