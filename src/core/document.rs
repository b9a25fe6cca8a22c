//! Lazy document handle
//!
//! Opening a document is expensive, and the skip-if-exists short circuit
//! means many file visits never need one. [`LazyDocument`] defers the
//! open until the first operation that requires it and guarantees the
//! document is closed before the creating scope returns, on every exit
//! path.

use crate::adapters::catalog::DataFile;
use crate::adapters::source::{Component, Document, ExportManager};
use crate::domain::{ExportContext, Result, SourceError};

/// A deferred handle to an open document.
///
/// States: unopened, opened, closed. `open` is a no-op once opened;
/// `close` is a no-op when nothing was opened. A handle that has been
/// closed cannot be reopened; construct a new handle for re-access.
pub struct LazyDocument<'a> {
    ctx: &'a ExportContext,
    file: &'a dyn DataFile,
    document: Option<Box<dyn Document>>,
    closed: bool,
}

impl<'a> LazyDocument<'a> {
    /// Binds a context and file-version reference without opening anything.
    pub fn new(ctx: &'a ExportContext, file: &'a dyn DataFile) -> Self {
        Self {
            ctx,
            file,
            document: None,
            closed: false,
        }
    }

    /// Opens the underlying document if it isn't open yet.
    ///
    /// The document is activated as the current view and, when the
    /// context requests it, every visibility flag in its component tree
    /// is turned on.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to open the document, or if
    /// this handle was already closed.
    pub fn open(&mut self) -> Result<()> {
        if self.document.is_some() {
            return Ok(());
        }
        if self.closed {
            return Err(SourceError::AlreadyClosed(self.file.name()).into());
        }

        tracing::info!(file = %self.file.name(), "Opening document");
        let document = self.ctx.source.open(self.file)?;
        document.activate();

        if self.ctx.unhide_all {
            unhide_all_in_component(document.root_component().as_ref());
        }

        self.document = Some(document);
        Ok(())
    }

    /// Closes the document without saving. No-op if nothing was opened.
    pub fn close(&mut self) {
        if let Some(document) = self.document.take() {
            self.closed = true;
            tracing::info!(file = %self.file.name(), "Closing document");
            if let Err(error) = document.close_without_saving() {
                tracing::warn!(
                    file = %self.file.name(),
                    error = %error,
                    "Failed to close document"
                );
            }
        }
    }

    /// True while the document is open.
    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Root of the open document's component tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle was never opened.
    pub fn root_component(&self) -> Result<Box<dyn Component>> {
        Ok(self.document()?.root_component())
    }

    /// Export manager of the open document.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle was never opened.
    pub fn export_manager(&self) -> Result<Box<dyn ExportManager>> {
        Ok(self.document()?.export_manager())
    }

    fn document(&self) -> Result<&dyn Document> {
        self.document
            .as_deref()
            .ok_or_else(|| SourceError::NotOpen(self.file.name()).into())
    }
}

impl Drop for LazyDocument<'_> {
    // Backstop for early returns; explicit close remains the normal path.
    fn drop(&mut self) {
        self.close();
    }
}

/// Turns on every visibility flag in a component tree, depth-first:
/// the bodies and sketch folder flags, every solid body, every mesh
/// body, and every occurrence, recursing into sub-components.
///
/// Containment is a tree, so no cycle detection is needed.
pub fn unhide_all_in_component(component: &dyn Component) {
    component.set_bodies_folder_visible(true);
    component.set_sketch_folder_visible(true);

    for body in component.bodies() {
        body.set_visible(true);
    }

    for body in component.mesh_bodies() {
        body.set_visible(true);
    }

    for occurrence in component.occurrences() {
        occurrence.set_visible(true);
        unhide_all_in_component(occurrence.component().as_ref());
    }
}
