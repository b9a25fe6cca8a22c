//! Export context
//!
//! The immutable bundle of settings threaded through every level of the
//! export recursion. Contexts form a tree mirroring the folder tree:
//! [`ExportContext::extend`] produces a child context with a deeper output
//! path and shares everything else; no context is ever mutated in place.

use crate::adapters::source::DocumentSource;
use crate::domain::format::ExportFormat;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable per-recursion-level export settings.
#[derive(Clone)]
pub struct ExportContext {
    /// Output folder for this recursion level
    pub folder: PathBuf,

    /// Requested output formats, in selection order, deduplicated
    pub formats: Vec<ExportFormat>,

    /// Names of the projects selected for export
    pub projects: BTreeSet<String>,

    /// Turn on every body/sketch-folder visibility flag after opening
    pub unhide_all: bool,

    /// Export every sketch in the component tree to DXF
    pub save_sketches: bool,

    /// Visit every historical version instead of just the current one
    pub save_all_versions: bool,

    /// The document-source capability used to open file versions
    pub source: Arc<dyn DocumentSource>,
}

impl ExportContext {
    /// Creates a context rooted at `folder` with all flags off.
    ///
    /// Duplicate formats are dropped, keeping the first occurrence so the
    /// user's selection order is preserved.
    pub fn new(
        folder: impl Into<PathBuf>,
        formats: Vec<ExportFormat>,
        projects: BTreeSet<String>,
        source: Arc<dyn DocumentSource>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let formats = formats
            .into_iter()
            .filter(|format| seen.insert(*format))
            .collect();

        Self {
            folder: folder.into(),
            formats,
            projects,
            unhide_all: false,
            save_sketches: false,
            save_all_versions: false,
            source,
        }
    }

    /// Sets the unhide-all flag.
    pub fn with_unhide_all(mut self, on: bool) -> Self {
        self.unhide_all = on;
        self
    }

    /// Sets the save-sketches flag.
    pub fn with_save_sketches(mut self, on: bool) -> Self {
        self.save_sketches = on;
        self
    }

    /// Sets the save-all-versions flag.
    pub fn with_save_all_versions(mut self, on: bool) -> Self {
        self.save_all_versions = on;
        self
    }

    /// Returns a child context whose folder is `folder / subpath`.
    ///
    /// All other fields are shared with the parent.
    pub fn extend(&self, subpath: impl AsRef<Path>) -> Self {
        let mut child = self.clone();
        child.folder = self.folder.join(subpath);
        child
    }

    /// True if the project with the given name was selected for export.
    pub fn is_project_selected(&self, name: &str) -> bool {
        self.projects.contains(name)
    }
}

impl fmt::Debug for ExportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportContext")
            .field("folder", &self.folder)
            .field("formats", &self.formats)
            .field("projects", &self.projects)
            .field("unhide_all", &self.unhide_all)
            .field("save_sketches", &self.save_sketches)
            .field("save_all_versions", &self.save_all_versions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::DataFile;
    use crate::adapters::source::Document;
    use crate::domain::errors::SourceError;
    use crate::domain::result::Result;

    struct NullSource;

    impl DocumentSource for NullSource {
        fn open(&self, file: &dyn DataFile) -> Result<Box<dyn Document>> {
            Err(SourceError::OpenFailed {
                name: file.name(),
                reason: "null source".to_string(),
            }
            .into())
        }
    }

    fn context() -> ExportContext {
        ExportContext::new(
            "/tmp/out",
            vec![ExportFormat::F3d, ExportFormat::Step],
            BTreeSet::from(["Alpha".to_string()]),
            Arc::new(NullSource),
        )
    }

    #[test]
    fn test_extend_joins_path_and_shares_settings() {
        let parent = context().with_save_sketches(true);
        let child = parent.extend("Sub");

        assert_eq!(child.folder, PathBuf::from("/tmp/out/Sub"));
        assert_eq!(child.formats, parent.formats);
        assert!(child.save_sketches);
        // parent untouched
        assert_eq!(parent.folder, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_extend_nests() {
        let ctx = context().extend("A").extend("B");
        assert_eq!(ctx.folder, PathBuf::from("/tmp/out/A/B"));
    }

    #[test]
    fn test_new_deduplicates_formats_keeping_order() {
        let ctx = ExportContext::new(
            "/tmp/out",
            vec![
                ExportFormat::Step,
                ExportFormat::F3d,
                ExportFormat::Step,
                ExportFormat::Stl,
            ],
            BTreeSet::new(),
            Arc::new(NullSource),
        );
        assert_eq!(
            ctx.formats,
            vec![ExportFormat::Step, ExportFormat::F3d, ExportFormat::Stl]
        );
    }

    #[test]
    fn test_project_selection() {
        let ctx = context();
        assert!(ctx.is_project_selected("Alpha"));
        assert!(!ctx.is_project_selected("Beta"));
    }

    #[test]
    fn test_flags_default_off() {
        let ctx = context();
        assert!(!ctx.unhide_all);
        assert!(!ctx.save_sketches);
        assert!(!ctx.save_all_versions);
    }
}
