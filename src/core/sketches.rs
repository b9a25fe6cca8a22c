//! Sketch export
//!
//! Recursive export of every 2D sketch in a document's component tree to
//! DXF. Sketches have no format selection; DXF is the single fixed
//! interchange format. The output directory tree mirrors the component
//! tree: each occurrence adds a sanitized path segment.

use crate::adapters::source::{Component, Sketch};
use crate::core::sanitize::sanitize_filename;
use crate::domain::{Counter, ExportContext, Result};
use std::fs;
use std::path::Path;

/// Exports the sketches of `component` and all its sub-components.
///
/// Per sketch: skip if the output already exists; otherwise create the
/// parent directories and delegate to the sketch capability. A failing
/// sketch is logged and counted, never propagated — one bad sketch must
/// not block the rest of the tree.
pub fn export_sketches(ctx: &ExportContext, component: &dyn Component) -> Counter {
    let mut counter = Counter::zero();

    for sketch in component.sketches() {
        let output_path = ctx
            .folder
            .join(format!("{}.dxf", sanitize_filename(&sketch.name())));

        if output_path.exists() {
            tracing::debug!(
                path = %output_path.display(),
                "Sketch output already exists, skipping"
            );
            counter = counter.merge(Counter::skipped(1));
            continue;
        }

        tracing::info!(
            sketch = %sketch.name(),
            component = %component.name(),
            path = %output_path.display(),
            "Exporting sketch"
        );
        counter = counter.merge(match save_sketch(sketch.as_ref(), &output_path) {
            Ok(()) => Counter::saved(1),
            Err(error) => {
                tracing::error!(
                    sketch = %sketch.name(),
                    component = %component.name(),
                    error = %error,
                    "Sketch export failed"
                );
                Counter::errored(1)
            }
        });
    }

    for occurrence in component.occurrences() {
        let child = occurrence.component();
        let child_ctx = ctx.extend(sanitize_filename(&occurrence.name()));
        counter = counter.merge(export_sketches(&child_ctx, child.as_ref()));
    }

    counter
}

fn save_sketch(sketch: &dyn Sketch, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    sketch.save_as_dxf(path)
}
