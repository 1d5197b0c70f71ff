//! Integration tests for `at2-recipe init`

use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

#[test]
fn test_init_writes_manifest_and_gitignore() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized at2.toml"));

    let manifest = fs::read_to_string(project.manifest_path()).unwrap();
    assert!(manifest.contains("[options]"));
    assert!(manifest.contains("https://github.com/g-truc/gli.git"));

    let gitignore = fs::read_to_string(project.project_path().join(".gitignore")).unwrap();
    assert!(gitignore.contains("/gli/"));
}

#[test]
fn test_init_refuses_existing_manifest() {
    let project = TestProject::new().unwrap();
    project.write_manifest("[options]\nuse_sdl = \"ON\"\n").unwrap();

    project
        .command()
        .arg("init")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert!(fs::read_to_string(project.manifest_path()).unwrap().contains("use_sdl = \"ON\""));
}

#[test]
fn test_init_force_then_resolve() {
    let project = TestProject::new().unwrap();
    project.write_manifest("garbage").unwrap();

    project.command().args(["init", "--force"]).assert().success();

    // The template enables gtest and keeps GLFW.
    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("glfw/[>=3.3.2]"))
        .stdout(predicate::str::contains("gtest/[>=1.10.0]"));
}
