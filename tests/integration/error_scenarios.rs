//! Error reporting: exit codes and the `error:` / `suggestion:` block

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_invalid_option_value() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["resolve", "-o", "use_sdl=maybe"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("'maybe'"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn test_option_spelling_is_case_sensitive() {
    let project = TestProject::new().unwrap();

    project.command().args(["resolve", "-o", "use_sdl=on"]).assert().failure().code(1);
    project.command().args(["resolve", "-o", "use_sdl=true"]).assert().failure().code(1);
}

#[test]
fn test_malformed_override() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["resolve", "-o", "use_sdl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}

#[test]
fn test_invalid_option_in_manifest() {
    let project = TestProject::new().unwrap();
    project.write_manifest("[options]\nuse_gtest = \"yes\"\n").unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("use_gtest"));
}

#[test]
fn test_unparseable_manifest() {
    let project = TestProject::new().unwrap();
    project.write_manifest("[options\nuse_sdl = ").unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse manifest"));
}

#[test]
fn test_unknown_option_is_ignored() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["resolve", "-o", "use_vulkan=ON"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glfw/[>=3.3.2]"));
}
