//! Integration tests for `at2-recipe build`

use predicates::prelude::*;
use std::fs;

use crate::common::{TestProject, manifest_with_external, tool_available};

/// Smallest project CMake can configure and build without a compiler.
const EMPTY_CMAKE_PROJECT: &str = "cmake_minimum_required(VERSION 3.10)\nproject(at2_engine NONE)\n";

#[test]
fn test_clone_failure_stops_before_configure() {
    if !tool_available("git") {
        return;
    }
    let project = TestProject::new().unwrap();
    project
        .write_manifest(&manifest_with_external(&project.sources_path().join("missing")))
        .unwrap();

    project
        .command()
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to clone"));

    assert!(!project.project_path().join("build").exists());
}

#[test]
fn test_invalid_option_stops_before_acquisition() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["build", "-o", "use_assimp=yes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid value 'yes' for option 'use_assimp'"));

    assert!(!project.project_path().join("gli").exists());
    assert!(!project.project_path().join("build").exists());
}

#[test]
fn test_configure_failure_is_reported() {
    if !tool_available("cmake") {
        return;
    }
    let project = TestProject::new().unwrap();
    project.create_dir("gli").unwrap();
    // No CMakeLists.txt in the project root.

    project
        .command()
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CMake configure failed"));

    // Requirements are handed over before CMake runs.
    let requirements =
        fs::read_to_string(project.project_path().join("build").join("at2-requirements.toml"))
            .unwrap();
    assert!(requirements.contains("glfw/[>=3.3.2]"));
}

#[cfg(unix)]
#[test]
fn test_full_build_with_imports() {
    if !tool_available("cmake") || !tool_available("make") {
        return;
    }
    let project = TestProject::new().unwrap();
    project.create_dir("gli").unwrap();
    fs::write(project.project_path().join("CMakeLists.txt"), EMPTY_CMAKE_PROJECT).unwrap();
    project
        .write_manifest(
            "[options]\nuse_gtest = \"OFF\"\n\n[build]\nbuild_type = \"Debug\"\nbuild_dir = \"out\"\nimports_root = \"deps\"\n",
        )
        .unwrap();
    let deps_lib = project.create_dir("deps/lib").unwrap();
    fs::write(deps_lib.join("libassimp.5.dylib"), "lib").unwrap();

    project
        .command()
        .args(["build", "-o", "use_assimp=ON"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built Debug"))
        .stdout(predicate::str::contains("ctest").not());

    let out = project.project_path().join("out");
    assert!(out.join("CMakeCache.txt").exists());
    assert!(out.join("bin").join("libassimp.5.dylib").exists());
    let requirements = fs::read_to_string(out.join("at2-requirements.toml")).unwrap();
    assert!(requirements.contains("assimp/[>=5.0.1]"));
}

#[cfg(unix)]
#[test]
fn test_skip_imports() {
    if !tool_available("cmake") || !tool_available("make") {
        return;
    }
    let project = TestProject::new().unwrap();
    project.create_dir("gli").unwrap();
    fs::write(project.project_path().join("CMakeLists.txt"), EMPTY_CMAKE_PROJECT).unwrap();
    project.write_manifest("[build]\nimports_root = \"deps\"\n").unwrap();
    let deps_bin = project.create_dir("deps/bin").unwrap();
    fs::write(deps_bin.join("SDL2.dll"), "dll").unwrap();

    project.command().args(["build", "--skip-imports"]).assert().success();

    assert!(!project.project_path().join("build").join("bin").join("SDL2.dll").exists());
}
