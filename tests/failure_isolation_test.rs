//! Integration tests for failure isolation
//!
//! A failure anywhere in the batch must be counted and logged at the
//! smallest enclosing scope, never aborting siblings, and the open
//! document must be released on every exit path.

use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use strata::adapters::memory::{ComponentNode, FileNode, FolderNode, MemoryVault, ProjectNode};
use strata::core::orchestrator::execute_export;
use strata::domain::{ExportContext, ExportFormat};

fn context(vault: &Arc<MemoryVault>, folder: &Path) -> ExportContext {
    ExportContext::new(
        folder,
        vec![ExportFormat::F3d, ExportFormat::Step],
        BTreeSet::from(["P".to_string()]),
        vault.clone(),
    )
}

#[test]
fn failing_file_does_not_abort_its_folder() {
    let dir = tempfile::tempdir().unwrap();
    // File #2 fails to open. With sketches enabled the open happens
    // up front, so the failure escapes the version visit and is
    // attributed at the folder level.
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P")
            .with_file(FileNode::new("First", "f3d").with_version(1, "ok"))
            .with_file(
                FileNode::new("Second", "f3d")
                    .with_version(1, "corrupt")
                    .with_failing_open(),
            )
            .with_file(FileNode::new("Third", "f3d").with_version(1, "ok")),
    )]));
    let ctx = context(&vault, dir.path()).with_save_sketches(true);

    let counter = execute_export(&ctx, vault.as_ref()).unwrap();

    assert!(counter.errored >= 1);
    assert!(dir.path().join("P/First/First_v1.step").exists());
    assert!(dir.path().join("P/Third/Third_v1.step").exists());
    assert!(!dir.path().join("P/Second/Second_v1.step").exists());
}

#[test]
fn failing_format_does_not_block_other_formats_or_files() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P")
            .with_file(
                FileNode::new("Flaky", "f3d")
                    .with_version(1, "step export broken")
                    .with_failing_format(ExportFormat::Step),
            )
            .with_file(FileNode::new("Solid", "f3d").with_version(1, "ok")),
    )]));
    let ctx = context(&vault, dir.path());

    let counter = execute_export(&ctx, vault.as_ref()).unwrap();

    assert_eq!(counter.errored, 1);
    // Flaky: archive + ledger. Solid: both formats + ledger.
    assert_eq!(counter.saved, 5);
    assert!(dir.path().join("P/Flaky/Flaky_v1.f3d").exists());
    assert!(!dir.path().join("P/Flaky/Flaky_v1.step").exists());
    assert!(dir.path().join("P/Solid/Solid_v1.step").exists());
}

#[test]
fn failing_sketch_does_not_block_exports() {
    let dir = tempfile::tempdir().unwrap();
    let root = Rc::new(
        ComponentNode::new("Model")
            .with_failing_sketch("Broken")
            .with_sketch("Layout"),
    );
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P").with_file(
            FileNode::new("Model", "f3d")
                .with_version(1, "first pass")
                .with_component(root),
        ),
    )]));
    let ctx = context(&vault, dir.path()).with_save_sketches(true);

    let counter = execute_export(&ctx, vault.as_ref()).unwrap();

    assert_eq!(counter.errored, 1);
    // The healthy sketch, both formats and the ledger all made it.
    assert_eq!(counter.saved, 4);
    assert!(dir.path().join("P/Model/Layout.dxf").exists());
    assert!(dir.path().join("P/Model/Model_v1.step").exists());
}

#[test]
fn document_handle_is_released_on_every_path() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P")
            .with_file(
                FileNode::new("AllBroken", "f3d")
                    .with_version(1, "everything fails")
                    .with_failing_format(ExportFormat::F3d)
                    .with_failing_format(ExportFormat::Step),
            )
            .with_file(FileNode::new("Fine", "f3d").with_version(1, "ok")),
    )]));
    let ctx = context(&vault, dir.path());

    execute_export(&ctx, vault.as_ref()).unwrap();

    // Every document that was opened was also closed, failures included.
    assert_eq!(vault.open_count(), vault.close_count());
    assert_eq!(vault.open_count(), 2);
}

#[test]
fn errored_items_are_reattempted_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P").with_file(
            FileNode::new("Flaky", "f3d")
                .with_version(1, "step export broken")
                .with_failing_format(ExportFormat::Step),
        ),
    )]));
    let ctx = context(&vault, dir.path());

    let first = execute_export(&ctx, vault.as_ref()).unwrap();
    assert_eq!(first.errored, 1);
    assert_eq!(first.saved, 2); // archive + ledger

    // A failed export left no output, so the re-run attempts it again
    // instead of skipping it.
    let second = execute_export(&ctx, vault.as_ref()).unwrap();
    assert_eq!(second.errored, 1);
    assert_eq!(second.saved, 0);
    assert_eq!(second.skipped, 2); // archive + ledger entry
}

#[test]
fn deep_folder_failure_stays_local() {
    let dir = tempfile::tempdir().unwrap();
    let vault = Arc::new(MemoryVault::new(vec![ProjectNode::new(
        "P",
        FolderNode::new("P")
            .with_folder(
                FolderNode::new("Broken").with_file(
                    FileNode::new("Bad", "f3d")
                        .with_version(1, "corrupt")
                        .with_failing_open(),
                ),
            )
            .with_folder(
                FolderNode::new("Healthy")
                    .with_file(FileNode::new("Good", "f3d").with_version(1, "ok")),
            ),
    )]));
    let ctx = context(&vault, dir.path()).with_save_sketches(true);

    let counter = execute_export(&ctx, vault.as_ref()).unwrap();

    assert_eq!(counter.errored, 1);
    assert!(dir.path().join("P/Healthy/Good/Good_v1.step").exists());
    assert!(!dir.path().join("P/Broken/Bad").exists());
}
