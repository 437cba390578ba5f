//! End-to-end scaffolding through the real adapters.

use std::path::Path;

use beeproject_adapters::{LocalFilesystem, MemoryFilesystem};
use beeproject_core::prelude::*;

fn beeproject_request(root: impl AsRef<Path>) -> ScaffoldRequest {
    let flags = vec![find_extension("beeproject").expect("builtin")];
    ScaffoldRequest::new(
        Options::new().with(keys::PROJECT, "foo"),
        root.as_ref(),
    )
    .with_extensions(resolve_activations(&flags))
}

#[test]
fn scaffold_into_memory() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(fs.clone()));

    let report = service.scaffold(&beeproject_request("/out")).unwrap();

    assert!(fs.exists(Path::new("/out/foo/environment.yaml")));
    assert!(fs.exists(Path::new("/out/foo/src/foo/submodule/manage.py")));
    assert!(!fs.exists(Path::new("/out/foo/requirements.txt")));
    assert!(!fs.exists(Path::new("/out/foo/src/foo/skeleton.py")));
    assert_eq!(report.written.len(), fs.list_files().len());
}

#[test]
fn update_keeps_user_edits() {
    let fs = MemoryFilesystem::new().with_file("/out/foo/environment.yaml", "name: mine\n");
    let service = ScaffoldService::new(Box::new(fs.clone()));

    let report = service
        .scaffold(&beeproject_request("/out").with_mode(WriteMode::Update))
        .unwrap();

    assert_eq!(
        fs.read_file(Path::new("/out/foo/environment.yaml")).as_deref(),
        Some("name: mine\n")
    );
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn force_overwrites_user_edits() {
    let fs = MemoryFilesystem::new().with_file("/out/foo/environment.yaml", "name: mine\n");
    let service = ScaffoldService::new(Box::new(fs.clone()));

    service
        .scaffold(&beeproject_request("/out").with_mode(WriteMode::Force))
        .unwrap();

    assert_ne!(
        fs.read_file(Path::new("/out/foo/environment.yaml")).as_deref(),
        Some("name: mine\n")
    );
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let fs = MemoryFilesystem::new().read_only("/out/foo/src");
    let service = ScaffoldService::new(Box::new(fs.clone()));

    let err = service.scaffold(&beeproject_request("/out")).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Internal);
    assert!(!fs.exists(Path::new("/out/foo")));
    assert!(fs.list_files().is_empty());
}

#[test]
fn scaffold_to_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    service.scaffold(&beeproject_request(tmp.path())).unwrap();

    let root = tmp.path().join("foo");
    let top = std::fs::read_to_string(root.join("src/foo/settings.py")).unwrap();
    let sub = std::fs::read_to_string(root.join("src/foo/submodule/settings.py")).unwrap();
    assert_eq!(top, sub);
    assert_eq!(
        std::fs::read_to_string(root.join("references/.gitignore")).unwrap(),
        ""
    );
    assert!(root.join(".pre-commit-config.yaml").is_file());

    let again = service.scaffold(&beeproject_request(tmp.path()));
    assert!(again.is_err(), "second create must refuse an existing project");
}
