//! Integration tests for `at2-recipe fetch`

use predicates::prelude::*;
use std::fs;

use crate::common::{TestProject, manifest_with_external, tool_available};

#[test]
fn test_existing_directory_is_not_cloned() {
    let project = TestProject::new().unwrap();
    // Unreachable URL: any clone attempt would fail.
    project
        .write_manifest(&manifest_with_external(&project.sources_path().join("nowhere")))
        .unwrap();
    let gli = project.create_dir("gli").unwrap();
    fs::write(gli.join("local.txt"), "edited").unwrap();

    project
        .command()
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));

    assert_eq!(fs::read_to_string(gli.join("local.txt")).unwrap(), "edited");
}

#[test]
fn test_fetch_clones_missing_directory() {
    if !tool_available("git") {
        return;
    }
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("gli").unwrap();
    project.write_manifest(&manifest_with_external(&source)).unwrap();

    project
        .command()
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched gli"));

    assert!(project.project_path().join("gli").join("README.md").exists());

    // Second run finds the clone and leaves it alone.
    project
        .command()
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
}

#[test]
fn test_fetch_failure_exits_nonzero() {
    if !tool_available("git") {
        return;
    }
    let project = TestProject::new().unwrap();
    project
        .write_manifest(&manifest_with_external(&project.sources_path().join("missing")))
        .unwrap();

    project
        .command()
        .arg("fetch")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to clone"));
}

#[test]
fn test_manifest_path_flag_sets_project_root() {
    if !tool_available("git") {
        return;
    }
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("gli").unwrap();
    let engine = project.create_dir("engine").unwrap();
    fs::write(engine.join("at2.toml"), manifest_with_external(&source)).unwrap();

    project
        .command()
        .args(["fetch", "--manifest-path", "engine/at2.toml"])
        .assert()
        .success();

    assert!(engine.join("gli").join("README.md").exists());
    assert!(!project.project_path().join("gli").exists());
}

#[test]
fn test_missing_explicit_manifest_is_not_replaced_by_defaults() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["fetch", "--manifest-path", "typo/at2.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Manifest not found"))
        .stderr(predicate::str::contains("typo"));

    assert!(!project.project_path().join("typo").exists());
    assert!(!project.project_path().join("gli").exists());
}
