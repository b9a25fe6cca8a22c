//! Recursive tree walker
//!
//! Visits projects → folders → files → versions, invoking the exporters
//! and merging their counters upward through every recursion level.
//!
//! Failure isolation invariant: an error at recursion level L is caught
//! and converted to `errored(1)` at that level and never prevents
//! siblings or ancestors from continuing. Only an error escaping the
//! top-level call aborts the run.

use crate::adapters::catalog::{DataFile, Folder, ProjectCatalog};
use crate::core::document::LazyDocument;
use crate::core::exporter::export_file;
use crate::core::ledger::record_version;
use crate::core::sanitize::sanitize_filename;
use crate::core::sketches::export_sketches;
use crate::domain::{Counter, ExportContext, Result, NATIVE_EXTENSION};

/// Visits one specific version of a file.
///
/// Call order: extension gate, sketch pass (when enabled), one export
/// per requested format, metadata ledger, unconditional close. A failing
/// format or ledger step is logged and counted at this level; only a
/// failure to open the document for the sketch pass escapes, to be
/// attributed by [`visit_folder`].
pub fn visit_file_version(ctx: &ExportContext, file: &dyn DataFile) -> Result<Counter> {
    tracing::info!(
        file = %file.name(),
        version = file.version_number(),
        extension = %file.extension(),
        "Visiting file version"
    );

    if file.extension() != NATIVE_EXTENSION {
        tracing::info!(
            file = %file.name(),
            extension = %file.extension(),
            "Extension is not currently handled, skipping"
        );
        return Ok(Counter::skipped(1));
    }

    let mut document = LazyDocument::new(ctx, file);
    let mut counter = Counter::zero();

    if ctx.save_sketches {
        document.open()?;
        let root = document.root_component()?;
        let sketch_ctx = ctx.extend(sanitize_filename(&root.name()));
        counter = counter.merge(export_sketches(&sketch_ctx, root.as_ref()));
    }

    for format in &ctx.formats {
        counter = counter.merge(
            match export_file(ctx, *format, file, &mut document) {
                Ok(result) => result,
                Err(error) => {
                    tracing::error!(
                        file = %file.name(),
                        version = file.version_number(),
                        format = %format,
                        error = %error,
                        "Format export failed"
                    );
                    Counter::errored(1)
                }
            },
        );
    }

    counter = counter.merge(match record_version(ctx, file) {
        Ok(result) => result,
        Err(error) => {
            tracing::error!(
                file = %file.name(),
                version = file.version_number(),
                error = %error,
                "Metadata ledger update failed"
            );
            Counter::errored(1)
        }
    });

    document.close();
    Ok(counter)
}

/// Visits a file: either just its current version, or — when
/// `save_all_versions` is set — every historical version, each with its
/// own skip/export decision.
pub fn visit_file(ctx: &ExportContext, file: &dyn DataFile) -> Result<Counter> {
    tracing::info!(
        file = %file.name(),
        extension = %file.extension(),
        versions = file.version_number(),
        "Visiting file"
    );

    if ctx.save_all_versions {
        let mut counter = Counter::zero();
        for version in file.versions()? {
            counter = counter.merge(visit_file_version(ctx, version.as_ref())?);
        }
        Ok(counter)
    } else {
        visit_file_version(ctx, file)
    }
}

/// Visits a folder: extends the context by the sanitized folder name,
/// visits every direct file (isolating per-file failures), then recurses
/// into every sub-folder.
///
/// Iteration follows the catalog's enumeration order, which keeps a
/// single run deterministic without promising any particular ordering.
pub fn visit_folder(ctx: &ExportContext, folder: &dyn Folder) -> Result<Counter> {
    tracing::info!(folder = %folder.name(), "Visiting folder");

    let ctx = ctx.extend(sanitize_filename(&folder.name()));
    let mut counter = Counter::zero();

    for file in folder.files()? {
        counter = counter.merge(match visit_file(&ctx, file.as_ref()) {
            Ok(result) => result,
            Err(error) => {
                tracing::error!(
                    file = %file.name(),
                    error = %error,
                    "Failed to visit file"
                );
                Counter::errored(1)
            }
        });
    }

    for sub_folder in folder.folders()? {
        counter = counter.merge(visit_folder(&ctx, sub_folder.as_ref())?);
    }

    Ok(counter)
}

/// Visits every selected project's root folder and merges the results.
pub fn run(ctx: &ExportContext, catalog: &dyn ProjectCatalog) -> Result<Counter> {
    let mut counter = Counter::zero();

    for project in catalog.projects()? {
        if !ctx.is_project_selected(&project.name()) {
            continue;
        }
        tracing::info!(project = %project.name(), "Exporting project");
        counter = counter.merge(visit_folder(ctx, project.root_folder().as_ref())?);
    }

    Ok(counter)
}
