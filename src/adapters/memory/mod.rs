//! In-memory vault adapter
//!
//! A self-contained implementation of every capability trait, backed by
//! plain data structures. It serves two purposes:
//!
//! - integration tests build small vaults programmatically and drive the
//!   walker against a real filesystem output directory;
//! - offline runs load a vault from a JSON manifest
//!   (`strata export --manifest vault.json`), which is handy for
//!   demonstrating and profiling the orchestration without a live
//!   document source.
//!
//! The adapter supports failure injection (per-version open failures,
//! per-format export failures, per-sketch save failures) so the engine's
//! failure-isolation behavior can be exercised deterministically.

pub mod manifest;

use crate::adapters::catalog::{DataFile, Folder, Project, ProjectCatalog};
use crate::adapters::source::{
    Body, Component, Document, DocumentSource, ExportManager, Occurrence, Sketch,
};
use crate::domain::{ExportFormat, Result, SourceError};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::any::Any;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Minimal DXF document written for every exported sketch.
const DXF_STUB: &str = "0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n";

fn default_created(version: u32) -> DateTime<Utc> {
    // Deterministic timestamps keep fixture output reproducible run to run.
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(i64::from(version))
}

/// Open/close bookkeeping, shared by every document the vault hands out.
#[derive(Debug, Default)]
pub struct VaultStats {
    opens: Cell<u64>,
    closes: Cell<u64>,
}

/// A complete in-memory vault: project catalog plus document source.
pub struct MemoryVault {
    projects: Vec<Rc<ProjectNode>>,
    stats: Rc<VaultStats>,
}

impl MemoryVault {
    /// Creates a vault from fully built project trees.
    pub fn new(projects: Vec<ProjectNode>) -> Self {
        Self {
            projects: projects.into_iter().map(Rc::new).collect(),
            stats: Rc::new(VaultStats::default()),
        }
    }

    /// Number of documents opened so far.
    pub fn open_count(&self) -> u64 {
        self.stats.opens.get()
    }

    /// Number of documents closed so far.
    pub fn close_count(&self) -> u64 {
        self.stats.closes.get()
    }
}

impl ProjectCatalog for MemoryVault {
    fn projects(&self) -> Result<Vec<Box<dyn Project>>> {
        Ok(self
            .projects
            .iter()
            .map(|node| Box::new(MemoryProject { node: node.clone() }) as Box<dyn Project>)
            .collect())
    }
}

impl DocumentSource for MemoryVault {
    fn open(&self, file: &dyn DataFile) -> Result<Box<dyn Document>> {
        let concrete = file
            .as_any()
            .downcast_ref::<MemoryDataFile>()
            .ok_or_else(|| SourceError::OpenFailed {
                name: file.name(),
                reason: "file reference does not belong to this vault".to_string(),
            })?;

        let version = concrete.version();
        if version.fail_open {
            return Err(SourceError::OpenFailed {
                name: file.name(),
                reason: "injected open failure".to_string(),
            }
            .into());
        }

        self.stats.opens.set(self.stats.opens.get() + 1);
        Ok(Box::new(MemoryDocument {
            node: concrete.node.clone(),
            version_index: concrete.version_index,
            stats: self.stats.clone(),
        }))
    }
}

/// A named project fixture.
pub struct ProjectNode {
    name: String,
    root: Rc<FolderNode>,
}

impl ProjectNode {
    /// Creates a project with the given root folder.
    pub fn new(name: impl Into<String>, root: FolderNode) -> Self {
        Self {
            name: name.into(),
            root: Rc::new(root),
        }
    }
}

/// A folder fixture holding files and sub-folders.
pub struct FolderNode {
    name: String,
    files: Vec<Rc<FileNode>>,
    folders: Vec<Rc<FolderNode>>,
}

impl FolderNode {
    /// Creates an empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Adds a file. The file must carry at least one version.
    pub fn with_file(mut self, file: FileNode) -> Self {
        assert!(
            !file.versions.is_empty(),
            "file fixtures need at least one version"
        );
        self.files.push(Rc::new(file));
        self
    }

    /// Adds a sub-folder.
    pub fn with_folder(mut self, folder: FolderNode) -> Self {
        self.folders.push(Rc::new(folder));
        self
    }
}

struct FileVersion {
    number: u32,
    description: String,
    created: DateTime<Utc>,
    component: Rc<ComponentNode>,
    fail_open: bool,
    fail_formats: BTreeSet<ExportFormat>,
}

/// A file fixture with its version history, oldest first.
pub struct FileNode {
    name: String,
    extension: String,
    versions: Vec<FileVersion>,
}

impl FileNode {
    /// Creates a file with no versions yet.
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            versions: Vec::new(),
        }
    }

    /// Appends a version. Its component tree defaults to a bare root
    /// component named after the file; timestamps are derived from the
    /// version number.
    pub fn with_version(mut self, number: u32, description: impl Into<String>) -> Self {
        let component = Rc::new(ComponentNode::new(self.name.clone()));
        self.versions.push(FileVersion {
            number,
            description: description.into(),
            created: default_created(number),
            component,
            fail_open: false,
            fail_formats: BTreeSet::new(),
        });
        self
    }

    /// Overrides the creation timestamp of the most recently added version.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        let version = self
            .versions
            .last_mut()
            .expect("with_created requires a preceding with_version");
        version.created = created;
        self
    }

    /// Replaces the component tree of the most recently added version.
    pub fn with_component(mut self, component: Rc<ComponentNode>) -> Self {
        let version = self
            .versions
            .last_mut()
            .expect("with_component requires a preceding with_version");
        version.component = component;
        self
    }

    /// Makes the most recently added version fail to open.
    pub fn with_failing_open(mut self) -> Self {
        let version = self
            .versions
            .last_mut()
            .expect("with_failing_open requires a preceding with_version");
        version.fail_open = true;
        self
    }

    /// Makes exports of `format` fail for the most recently added version.
    pub fn with_failing_format(mut self, format: ExportFormat) -> Self {
        let version = self
            .versions
            .last_mut()
            .expect("with_failing_format requires a preceding with_version");
        version.fail_formats.insert(format);
        self
    }
}

/// A component fixture with visibility flags, bodies, sketches and
/// child occurrences.
pub struct ComponentNode {
    name: String,
    bodies_folder_visible: Cell<bool>,
    sketch_folder_visible: Cell<bool>,
    bodies: Vec<Rc<BodyNode>>,
    mesh_bodies: Vec<Rc<BodyNode>>,
    sketches: Vec<Rc<SketchNode>>,
    children: Vec<Rc<OccurrenceNode>>,
}

impl ComponentNode {
    /// Creates a component with everything hidden.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies_folder_visible: Cell::new(false),
            sketch_folder_visible: Cell::new(false),
            bodies: Vec::new(),
            mesh_bodies: Vec::new(),
            sketches: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a hidden solid body.
    pub fn with_body(mut self) -> Self {
        self.bodies.push(Rc::new(BodyNode::default()));
        self
    }

    /// Adds a hidden mesh body.
    pub fn with_mesh_body(mut self) -> Self {
        self.mesh_bodies.push(Rc::new(BodyNode::default()));
        self
    }

    /// Adds a sketch.
    pub fn with_sketch(mut self, name: impl Into<String>) -> Self {
        self.sketches.push(Rc::new(SketchNode {
            name: name.into(),
            fail: false,
        }));
        self
    }

    /// Adds a sketch whose DXF save always fails.
    pub fn with_failing_sketch(mut self, name: impl Into<String>) -> Self {
        self.sketches.push(Rc::new(SketchNode {
            name: name.into(),
            fail: true,
        }));
        self
    }

    /// Adds a child occurrence instantiating `component`.
    pub fn with_child(mut self, occurrence_name: impl Into<String>, component: Rc<ComponentNode>) -> Self {
        self.children.push(Rc::new(OccurrenceNode {
            name: occurrence_name.into(),
            visible: Cell::new(false),
            component,
        }));
        self
    }

    /// Current bodies-folder visibility flag (test inspection).
    pub fn bodies_folder_visible(&self) -> bool {
        self.bodies_folder_visible.get()
    }

    /// Current sketch-folder visibility flag (test inspection).
    pub fn sketch_folder_visible(&self) -> bool {
        self.sketch_folder_visible.get()
    }

    /// Visibility flags of this component's solid bodies (test inspection).
    pub fn body_visibility(&self) -> Vec<bool> {
        self.bodies.iter().map(|body| body.visible.get()).collect()
    }

    /// Visibility flags of this component's mesh bodies (test inspection).
    pub fn mesh_visibility(&self) -> Vec<bool> {
        self.mesh_bodies
            .iter()
            .map(|body| body.visible.get())
            .collect()
    }

    /// Visibility flags of this component's occurrences (test inspection).
    pub fn occurrence_visibility(&self) -> Vec<bool> {
        self.children
            .iter()
            .map(|child| child.visible.get())
            .collect()
    }
}

/// A body fixture; hidden until a traversal turns it on.
#[derive(Default)]
pub struct BodyNode {
    visible: Cell<bool>,
}

struct SketchNode {
    name: String,
    fail: bool,
}

struct OccurrenceNode {
    name: String,
    visible: Cell<bool>,
    component: Rc<ComponentNode>,
}

// ---------------------------------------------------------------------------
// Trait wrappers

struct MemoryProject {
    node: Rc<ProjectNode>,
}

impl Project for MemoryProject {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn root_folder(&self) -> Box<dyn Folder> {
        Box::new(MemoryFolder {
            node: self.node.root.clone(),
        })
    }
}

struct MemoryFolder {
    node: Rc<FolderNode>,
}

impl Folder for MemoryFolder {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn files(&self) -> Result<Vec<Box<dyn DataFile>>> {
        Ok(self
            .node
            .files
            .iter()
            .map(|file| {
                Box::new(MemoryDataFile {
                    node: file.clone(),
                    version_index: file.versions.len() - 1,
                }) as Box<dyn DataFile>
            })
            .collect())
    }

    fn folders(&self) -> Result<Vec<Box<dyn Folder>>> {
        Ok(self
            .node
            .folders
            .iter()
            .map(|folder| Box::new(MemoryFolder { node: folder.clone() }) as Box<dyn Folder>)
            .collect())
    }
}

/// A file/version reference handed out by [`MemoryVault`].
pub struct MemoryDataFile {
    node: Rc<FileNode>,
    version_index: usize,
}

impl MemoryDataFile {
    fn version(&self) -> &FileVersion {
        &self.node.versions[self.version_index]
    }
}

impl DataFile for MemoryDataFile {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn extension(&self) -> String {
        self.node.extension.clone()
    }

    fn version_number(&self) -> u32 {
        self.version().number
    }

    fn description(&self) -> String {
        self.version().description.clone()
    }

    fn created(&self) -> DateTime<Utc> {
        self.version().created
    }

    fn versions(&self) -> Result<Vec<Box<dyn DataFile>>> {
        Ok((0..self.node.versions.len())
            .map(|index| {
                Box::new(MemoryDataFile {
                    node: self.node.clone(),
                    version_index: index,
                }) as Box<dyn DataFile>
            })
            .collect())
    }
}

struct MemoryDocument {
    node: Rc<FileNode>,
    version_index: usize,
    stats: Rc<VaultStats>,
}

impl Document for MemoryDocument {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn activate(&self) {}

    fn root_component(&self) -> Box<dyn Component> {
        Box::new(MemoryComponent {
            node: self.node.versions[self.version_index].component.clone(),
        })
    }

    fn export_manager(&self) -> Box<dyn ExportManager> {
        Box::new(MemoryExportManager {
            node: self.node.clone(),
            version_index: self.version_index,
        })
    }

    fn close_without_saving(self: Box<Self>) -> Result<()> {
        self.stats.closes.set(self.stats.closes.get() + 1);
        Ok(())
    }
}

struct MemoryComponent {
    node: Rc<ComponentNode>,
}

impl Component for MemoryComponent {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn set_bodies_folder_visible(&self, visible: bool) {
        self.node.bodies_folder_visible.set(visible);
    }

    fn set_sketch_folder_visible(&self, visible: bool) {
        self.node.sketch_folder_visible.set(visible);
    }

    fn bodies(&self) -> Vec<Box<dyn Body>> {
        self.node
            .bodies
            .iter()
            .map(|body| Box::new(MemoryBody { node: body.clone() }) as Box<dyn Body>)
            .collect()
    }

    fn mesh_bodies(&self) -> Vec<Box<dyn Body>> {
        self.node
            .mesh_bodies
            .iter()
            .map(|body| Box::new(MemoryBody { node: body.clone() }) as Box<dyn Body>)
            .collect()
    }

    fn sketches(&self) -> Vec<Box<dyn Sketch>> {
        self.node
            .sketches
            .iter()
            .map(|sketch| Box::new(MemorySketch { node: sketch.clone() }) as Box<dyn Sketch>)
            .collect()
    }

    fn occurrences(&self) -> Vec<Box<dyn Occurrence>> {
        self.node
            .children
            .iter()
            .map(|child| Box::new(MemoryOccurrence { node: child.clone() }) as Box<dyn Occurrence>)
            .collect()
    }
}

struct MemoryBody {
    node: Rc<BodyNode>,
}

impl Body for MemoryBody {
    fn set_visible(&self, visible: bool) {
        self.node.visible.set(visible);
    }
}

struct MemoryOccurrence {
    node: Rc<OccurrenceNode>,
}

impl Occurrence for MemoryOccurrence {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn set_visible(&self, visible: bool) {
        self.node.visible.set(visible);
    }

    fn component(&self) -> Box<dyn Component> {
        Box::new(MemoryComponent {
            node: self.node.component.clone(),
        })
    }
}

struct MemorySketch {
    node: Rc<SketchNode>,
}

impl Sketch for MemorySketch {
    fn name(&self) -> String {
        self.node.name.clone()
    }

    fn save_as_dxf(&self, path: &Path) -> Result<()> {
        if self.node.fail {
            return Err(SourceError::ExportRejected {
                path: path.display().to_string(),
                reason: "injected sketch failure".to_string(),
            }
            .into());
        }
        fs::write(path, DXF_STUB)?;
        Ok(())
    }
}

struct MemoryExportManager {
    node: Rc<FileNode>,
    version_index: usize,
}

impl MemoryExportManager {
    fn write(&self, format: ExportFormat, header: &str, path: &Path) -> Result<()> {
        let version = &self.node.versions[self.version_index];
        if version.fail_formats.contains(&format) {
            return Err(SourceError::ExportRejected {
                path: path.display().to_string(),
                reason: format!("injected {format} export failure"),
            }
            .into());
        }
        let body = format!("{header}\n{} v{}\n", self.node.name, version.number);
        fs::write(path, body)?;
        Ok(())
    }
}

impl ExportManager for MemoryExportManager {
    fn export_archive(&self, path: &Path) -> Result<()> {
        self.write(ExportFormat::F3d, "STRATA-ARCHIVE", path)
    }

    fn export_step(&self, path: &Path) -> Result<()> {
        self.write(ExportFormat::Step, "ISO-10303-21", path)
    }

    fn export_stl(&self, root: &dyn Component, path: &Path) -> Result<()> {
        let header = format!("solid {}", root.name());
        self.write(ExportFormat::Stl, &header, path)
    }

    fn export_iges(&self, path: &Path) -> Result<()> {
        self.write(ExportFormat::Iges, "IGES 5.3", path)
    }

    fn export_sat(&self, path: &Path) -> Result<()> {
        self.write(ExportFormat::Sat, "ACIS SAT", path)
    }

    fn export_smt(&self, path: &Path) -> Result<()> {
        self.write(ExportFormat::Smt, "SMT", path)
    }
}
