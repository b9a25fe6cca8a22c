//! Document source abstraction traits
//!
//! This module defines the traits through which the export engine opens
//! documents, walks their component trees, and delegates the actual
//! geometry export. Opening, rendering and closing a document are atomic
//! black-box operations provided by the adapter behind these traits; the
//! engine only orchestrates them.

use crate::adapters::catalog::DataFile;
use crate::domain::Result;
use std::path::Path;

/// Document-source capability
///
/// Given a file/version reference, opens it as an editable document.
pub trait DocumentSource {
    /// Open the document for the given file version.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened.
    fn open(&self, file: &dyn DataFile) -> Result<Box<dyn Document>>;
}

/// An open document.
///
/// Owned by exactly one lazy handle at a time; the handle guarantees the
/// document is closed before its creating scope returns.
pub trait Document {
    /// Document name (diagnostics only).
    fn name(&self) -> String;

    /// Activate the document as the current view.
    fn activate(&self);

    /// The root of the document's component containment tree.
    fn root_component(&self) -> Box<dyn Component>;

    /// The export-manager capability for this document.
    fn export_manager(&self) -> Box<dyn ExportManager>;

    /// Close the document without persisting modifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the close request is rejected.
    fn close_without_saving(self: Box<Self>) -> Result<()>;
}

/// A node in a document's component containment tree.
///
/// Components own bodies, mesh bodies, sketches and child component
/// occurrences. Containment is a tree, so traversals need no cycle
/// detection.
pub trait Component {
    /// Component name (not yet sanitized).
    fn name(&self) -> String;

    /// Toggle the folder-level visibility flag for bodies.
    fn set_bodies_folder_visible(&self, visible: bool);

    /// Toggle the folder-level visibility flag for sketches.
    fn set_sketch_folder_visible(&self, visible: bool);

    /// Solid bodies directly owned by this component.
    fn bodies(&self) -> Vec<Box<dyn Body>>;

    /// Mesh bodies directly owned by this component.
    fn mesh_bodies(&self) -> Vec<Box<dyn Body>>;

    /// Sketches directly owned by this component.
    fn sketches(&self) -> Vec<Box<dyn Sketch>>;

    /// Direct sub-component occurrences.
    fn occurrences(&self) -> Vec<Box<dyn Occurrence>>;
}

/// A body (solid or mesh) with a visibility flag.
pub trait Body {
    /// Toggle the body's visibility flag.
    fn set_visible(&self, visible: bool);
}

/// An instantiation of a sub-component within a parent component.
pub trait Occurrence {
    /// Occurrence name (not yet sanitized).
    fn name(&self) -> String;

    /// Toggle the occurrence's visibility flag.
    fn set_visible(&self, visible: bool);

    /// The component instantiated by this occurrence.
    fn component(&self) -> Box<dyn Component>;
}

/// A 2D planar sketch owned by a component.
pub trait Sketch {
    /// Sketch name (not yet sanitized).
    fn name(&self) -> String;

    /// Write the sketch to `path` as a 2D vector interchange (DXF) file.
    ///
    /// # Errors
    ///
    /// Returns an error if the sketch cannot be written.
    fn save_as_dxf(&self, path: &Path) -> Result<()>;
}

/// Export-manager capability
///
/// Constructs and executes format-specific exports for one open document.
/// One method per supported format; the multi-format exporter dispatches
/// over [`crate::domain::ExportFormat`] with an exhaustive match, so an
/// unsupported format cannot reach this trait at runtime.
pub trait ExportManager {
    /// Export the document as a native archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_archive(&self, path: &Path) -> Result<()>;

    /// Export the document as STEP.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_step(&self, path: &Path) -> Result<()>;

    /// Export the given root component as an STL mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_stl(&self, root: &dyn Component, path: &Path) -> Result<()>;

    /// Export the document as IGES.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_iges(&self, path: &Path) -> Result<()>;

    /// Export the document as SAT.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_sat(&self, path: &Path) -> Result<()>;

    /// Export the document as SMT.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn export_smt(&self, path: &Path) -> Result<()>;
}
