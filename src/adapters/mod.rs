//! External system integrations for Strata.
//!
//! This module defines the capability traits through which the core
//! engine talks to the outside world, plus the bundled in-memory
//! implementation:
//!
//! - [`catalog`] - project/folder/file enumeration traits
//! - [`source`] - document opening, component trees, export execution
//! - [`memory`] - in-memory vault (tests, JSON-manifest offline runs)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external
//! dependencies and enable testing with in-memory implementations. The
//! core never constructs documents or geometry itself; it orchestrates
//! black-box operations exposed by these traits. A production adapter
//! for a live CAD workspace implements the same traits and plugs into
//! the engine unchanged.

pub mod catalog;
pub mod memory;
pub mod source;

pub use catalog::{DataFile, Folder, Project, ProjectCatalog};
pub use memory::MemoryVault;
pub use source::{Body, Component, Document, DocumentSource, ExportManager, Occurrence, Sketch};
