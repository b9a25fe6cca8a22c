//! Project catalog abstraction traits
//!
//! This module defines the traits through which the export engine
//! enumerates the hierarchical project/folder/file structure of a design
//! vault. The engine never owns this data: projects, folders and files
//! are externally supplied, immutable views.

use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::any::Any;

/// Project catalog capability
///
/// Enumerates the named projects of a design vault. Each project exposes
/// a root folder; folders enumerate child files and sub-folders; files
/// enumerate their historical versions.
pub trait ProjectCatalog {
    /// Enumerate all projects in the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be reached or enumerated.
    fn projects(&self) -> Result<Vec<Box<dyn Project>>>;
}

/// A named project with a single root folder.
pub trait Project {
    /// Project name as shown to the user (used for selection).
    fn name(&self) -> String;

    /// The project's root folder.
    fn root_folder(&self) -> Box<dyn Folder>;
}

/// A folder node in a project's tree.
pub trait Folder {
    /// Folder name (sanitized by the walker before it becomes a path).
    fn name(&self) -> String;

    /// Direct files of this folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder's file list cannot be enumerated.
    fn files(&self) -> Result<Vec<Box<dyn DataFile>>>;

    /// Direct sub-folders of this folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder's sub-folder list cannot be
    /// enumerated.
    fn folders(&self) -> Result<Vec<Box<dyn Folder>>>;
}

/// A reference to a named document at a specific version.
///
/// Immutable and externally supplied. A `DataFile` obtained from a
/// [`Folder`] refers to the file's current version; the historical
/// versions are reachable through [`DataFile::versions`], each again as a
/// `DataFile` pinned to its own version number.
pub trait DataFile {
    /// Downcast to Any for adapter-specific operations
    ///
    /// This allows a document source to recover its concrete file
    /// representation from the trait object when opening.
    fn as_any(&self) -> &dyn Any;

    /// Document name (not yet sanitized).
    fn name(&self) -> String;

    /// File extension identifying the document type, e.g. `f3d`.
    fn extension(&self) -> String;

    /// Monotonically increasing version number of this reference.
    fn version_number(&self) -> u32;

    /// Human-entered description of this version.
    fn description(&self) -> String;

    /// Creation timestamp of this version.
    fn created(&self) -> DateTime<Utc>;

    /// Every historical version of this file, oldest first, each pinned
    /// to its own version number.
    ///
    /// # Errors
    ///
    /// Returns an error if the version history cannot be enumerated.
    fn versions(&self) -> Result<Vec<Box<dyn DataFile>>>;
}
