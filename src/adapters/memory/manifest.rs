//! JSON manifest loading for the in-memory vault
//!
//! Manifests describe a vault's project/folder/file/version tree in one
//! JSON document, optionally including component trees with sketches.
//! They back `strata export --manifest` runs and double as shareable
//! repro cases.
//!
//! ```json
//! {
//!   "projects": [{
//!     "name": "Alpha",
//!     "root": {
//!       "name": "Alpha",
//!       "files": [{
//!         "name": "Bracket",
//!         "extension": "f3d",
//!         "versions": [{ "number": 1, "description": "first pass" }]
//!       }]
//!     }
//!   }]
//! }
//! ```

use super::{ComponentNode, FileNode, FolderNode, MemoryVault, ProjectNode};
use crate::domain::{Result, StrataError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Root of a vault manifest.
#[derive(Debug, Deserialize)]
pub struct VaultManifest {
    pub projects: Vec<ProjectManifest>,
}

/// One project with its root folder.
#[derive(Debug, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
    pub root: FolderManifest,
}

/// A folder with files and sub-folders.
#[derive(Debug, Deserialize)]
pub struct FolderManifest {
    pub name: String,
    #[serde(default)]
    pub files: Vec<FileManifest>,
    #[serde(default)]
    pub folders: Vec<FolderManifest>,
}

/// A file with its version history.
#[derive(Debug, Deserialize)]
pub struct FileManifest {
    pub name: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    pub versions: Vec<VersionManifest>,
}

fn default_extension() -> String {
    "f3d".to_string()
}

/// One version of a file.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub number: u32,
    #[serde(default)]
    pub description: String,
    /// Defaults to a timestamp derived from the version number.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub component: Option<ComponentManifest>,
}

/// A component with bodies, sketches and child occurrences.
#[derive(Debug, Deserialize)]
pub struct ComponentManifest {
    pub name: String,
    #[serde(default)]
    pub bodies: u32,
    #[serde(default)]
    pub mesh_bodies: u32,
    #[serde(default)]
    pub sketches: Vec<String>,
    #[serde(default)]
    pub children: Vec<OccurrenceManifest>,
}

/// A child occurrence instantiating a component.
#[derive(Debug, Deserialize)]
pub struct OccurrenceManifest {
    pub name: String,
    pub component: ComponentManifest,
}

impl VaultManifest {
    /// Reads and parses a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// manifest.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            StrataError::Configuration(format!(
                "Failed to read vault manifest {}: {e}",
                path.display()
            ))
        })?;
        let manifest: VaultManifest = serde_json::from_str(&contents).map_err(|e| {
            StrataError::Configuration(format!(
                "Failed to parse vault manifest {}: {e}",
                path.display()
            ))
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        fn check_folder(folder: &FolderManifest) -> Result<()> {
            for file in &folder.files {
                if file.versions.is_empty() {
                    return Err(StrataError::Configuration(format!(
                        "File `{}` in folder `{}` has no versions",
                        file.name, folder.name
                    )));
                }
            }
            for sub in &folder.folders {
                check_folder(sub)?;
            }
            Ok(())
        }

        for project in &self.projects {
            check_folder(&project.root)?;
        }
        Ok(())
    }

    /// Builds the in-memory vault described by this manifest.
    pub fn into_vault(self) -> MemoryVault {
        let projects = self
            .projects
            .into_iter()
            .map(|project| ProjectNode::new(project.name, build_folder(project.root)))
            .collect();
        MemoryVault::new(projects)
    }
}

fn build_folder(manifest: FolderManifest) -> FolderNode {
    let mut folder = FolderNode::new(manifest.name);
    for file in manifest.files {
        folder = folder.with_file(build_file(file));
    }
    for sub in manifest.folders {
        folder = folder.with_folder(build_folder(sub));
    }
    folder
}

fn build_file(manifest: FileManifest) -> FileNode {
    let mut file = FileNode::new(manifest.name, manifest.extension);
    let mut versions = manifest.versions;
    // History is oldest-first regardless of manifest ordering.
    versions.sort_by_key(|version| version.number);
    for version in versions {
        file = file.with_version(version.number, version.description);
        if let Some(created) = version.created {
            file = file.with_created(created);
        }
        if let Some(component) = version.component {
            file = file.with_component(Rc::new(build_component(component)));
        }
    }
    file
}

fn build_component(manifest: ComponentManifest) -> ComponentNode {
    let mut component = ComponentNode::new(manifest.name);
    for _ in 0..manifest.bodies {
        component = component.with_body();
    }
    for _ in 0..manifest.mesh_bodies {
        component = component.with_mesh_body();
    }
    for sketch in manifest.sketches {
        component = component.with_sketch(sketch);
    }
    for child in manifest.children {
        component = component.with_child(child.name, Rc::new(build_component(child.component)));
    }
    component
}

/// Convenience wrapper: load a manifest and build its vault in one step.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed or validated.
pub fn load_vault(path: impl AsRef<Path>) -> Result<MemoryVault> {
    Ok(VaultManifest::from_path(path)?.into_vault())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::ProjectCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"{
        "projects": [{
            "name": "Alpha",
            "root": {
                "name": "Alpha",
                "files": [{
                    "name": "Bracket",
                    "versions": [
                        { "number": 2, "description": "rework" },
                        { "number": 1, "description": "first pass" }
                    ]
                }],
                "folders": [{
                    "name": "Drawings",
                    "files": [{
                        "name": "Plate",
                        "extension": "dwg",
                        "versions": [{ "number": 1 }]
                    }]
                }]
            }
        }]
    }"#;

    fn write_manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_vault_from_manifest() {
        let file = write_manifest(MANIFEST);
        let vault = load_vault(file.path()).unwrap();

        let projects = vault.projects().unwrap();
        assert_eq!(projects.len(), 1);

        let root = projects[0].root_folder();
        let files = root.files().unwrap();
        assert_eq!(files.len(), 1);
        // Versions were sorted oldest-first, so the current file is v2.
        assert_eq!(files[0].version_number(), 2);

        let subs = root.folders().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name(), "Drawings");
        assert_eq!(subs[0].files().unwrap()[0].extension(), "dwg");
    }

    #[test]
    fn test_manifest_rejects_file_without_versions() {
        let file = write_manifest(
            r#"{"projects": [{"name": "A", "root": {"name": "A",
                "files": [{"name": "Empty", "versions": []}]}}]}"#,
        );
        let result = VaultManifest::from_path(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_rejects_invalid_json() {
        let file = write_manifest("{ not json");
        assert!(VaultManifest::from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_manifest_file() {
        assert!(VaultManifest::from_path("no-such-manifest.json").is_err());
    }

    #[test]
    fn test_component_manifest_builds_tree() {
        let file = write_manifest(
            r#"{"projects": [{"name": "A", "root": {"name": "A",
                "files": [{"name": "Asm", "versions": [{
                    "number": 1,
                    "component": {
                        "name": "Asm",
                        "bodies": 2,
                        "sketches": ["Layout"],
                        "children": [{
                            "name": "Sub:1",
                            "component": { "name": "Sub", "sketches": ["Profile"] }
                        }]
                    }
                }]}]}}]}"#,
        );
        let vault = load_vault(file.path()).unwrap();
        let projects = vault.projects().unwrap();
        let files = projects[0].root_folder().files().unwrap();
        assert_eq!(files[0].name(), "Asm");
    }
}
