//! Export path resolution
//!
//! Output paths are a pure function of (context, format, file reference).
//! This determinism is what makes skip-if-exists idempotence work: a
//! re-run resolves exactly the same paths and finds the artifacts of the
//! previous run.

use crate::adapters::catalog::DataFile;
use crate::core::sanitize::sanitize_filename;
use crate::domain::{ExportContext, ExportFormat};
use std::path::PathBuf;

/// Resolves the output path for one (file version, format) pair:
/// `folder / <sanitized> / <sanitized>_v<version>.<ext>`.
pub fn export_path(ctx: &ExportContext, format: ExportFormat, file: &dyn DataFile) -> PathBuf {
    let sanitized = sanitize_filename(&file.name());
    let filename = format!(
        "{sanitized}_v{}.{}",
        file.version_number(),
        format.extension()
    );
    ctx.folder.join(sanitized).join(filename)
}

/// Resolves the metadata ledger path for a file:
/// `folder / <sanitized> / <sanitized>_metadata.txt`.
///
/// One ledger per logical file, shared by all its versions.
pub fn ledger_path(ctx: &ExportContext, file: &dyn DataFile) -> PathBuf {
    let sanitized = sanitize_filename(&file.name());
    let filename = format!("{sanitized}_metadata.txt");
    ctx.folder.join(sanitized).join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::ProjectCatalog;
    use crate::adapters::memory::{FileNode, FolderNode, MemoryVault, ProjectNode};
    use crate::adapters::source::DocumentSource;
    use std::collections::BTreeSet;
    use std::path::Path;
    use std::sync::Arc;

    fn vault_with(name: &str) -> MemoryVault {
        MemoryVault::new(vec![ProjectNode::new(
            "P",
            FolderNode::new("P").with_file(FileNode::new(name, "f3d").with_version(3, "rework")),
        )])
    }

    fn context(source: Arc<dyn DocumentSource>) -> ExportContext {
        ExportContext::new(
            "/out",
            vec![ExportFormat::Step],
            BTreeSet::new(),
            source,
        )
    }

    #[test]
    fn test_export_path_layout() {
        let vault = Arc::new(vault_with("Model"));
        let ctx = context(vault.clone());
        let files = vault.projects().unwrap()[0].root_folder().files().unwrap();

        let path = export_path(&ctx, ExportFormat::Step, files[0].as_ref());
        assert_eq!(path, Path::new("/out/Model/Model_v3.step"));
    }

    #[test]
    fn test_export_path_sanitizes_both_segments() {
        let vault = Arc::new(vault_with("Model 1/2"));
        let ctx = context(vault.clone());
        let files = vault.projects().unwrap()[0].root_folder().files().unwrap();

        let path = export_path(&ctx, ExportFormat::F3d, files[0].as_ref());
        let dir = path.parent().unwrap().file_name().unwrap().to_str().unwrap();
        let file = path.file_name().unwrap().to_str().unwrap();
        assert!(dir.starts_with("Model 1 2_"));
        assert!(file.starts_with(dir));
        assert!(file.ends_with("_v3.f3d"));
    }

    #[test]
    fn test_ledger_path_layout() {
        let vault = Arc::new(vault_with("Model"));
        let ctx = context(vault.clone());
        let files = vault.projects().unwrap()[0].root_folder().files().unwrap();

        let path = ledger_path(&ctx, files[0].as_ref());
        assert_eq!(path, Path::new("/out/Model/Model_metadata.txt"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let vault = Arc::new(vault_with("Model"));
        let ctx = context(vault.clone());
        let files = vault.projects().unwrap()[0].root_folder().files().unwrap();

        assert_eq!(
            export_path(&ctx, ExportFormat::Sat, files[0].as_ref()),
            export_path(&ctx, ExportFormat::Sat, files[0].as_ref())
        );
    }
}
