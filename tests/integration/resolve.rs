//! Integration tests for `at2-recipe resolve`

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_resolve_without_manifest_uses_defaults() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Requirements (5)"))
        .stdout(predicate::str::contains("glm/0.9.9.8"))
        .stdout(predicate::str::contains("glfw/[>=3.3.2]"))
        .stdout(predicate::str::contains("gtest").not())
        .stdout(predicate::str::contains("glad:gl_version=4.5"));
}

#[test]
fn test_resolve_sdl_from_manifest() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest("[options]\nuse_sdl = true\nuse_assimp = \"ON\"\n")
        .unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdl/[>=2.0.14]"))
        .stdout(predicate::str::contains("assimp/[>=5.0.1]"))
        .stdout(predicate::str::contains("glfw").not());
}

#[test]
fn test_command_line_override_wins() {
    let project = TestProject::new().unwrap();
    project.write_manifest("[options]\nuse_sdl = \"ON\"\n").unwrap();

    project
        .command()
        .args(["resolve", "-o", "use_sdl=OFF", "-o", "use_gtest=TRUE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glfw/[>=3.3.2]"))
        .stdout(predicate::str::contains("gtest/[>=1.10.0]"))
        .stdout(predicate::str::contains("sdl/").not());
}

#[test]
fn test_resolve_json() {
    let project = TestProject::new().unwrap();

    let output = project
        .command()
        .args(["resolve", "--format", "json", "-o", "use_sdl=ON", "-o", "use_gtest=ON"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let requires: Vec<&str> =
        json["requires"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(
        requires,
        [
            "glm/0.9.9.8",
            "stb/20200203",
            "glad/0.1.34",
            "nlohmann_json/3.9.1",
            "sdl/[>=2.0.14]",
            "gtest/[>=1.10.0]"
        ]
    );
    assert_eq!(json["package_options"][2]["value"], "GL_ARB_texture_filter_anisotropic,GL_KHR_debug");
}

#[test]
fn test_resolve_has_no_side_effects() {
    let project = TestProject::new().unwrap();

    project.command().arg("resolve").assert().success();

    assert!(!project.project_path().join("gli").exists());
    assert!(!project.project_path().join("build").exists());
}
