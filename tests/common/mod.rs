//! Shared helpers for the integration suite
//!
//! Every test gets its own project directory under a temp dir and runs the
//! real binary in it. Nothing here touches the network: "remote" sources are
//! local git repositories.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use at2_recipe::test_utils::init_git_repo;

/// A throwaway project directory plus a place for source repositories.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    sources_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let sources_dir = temp_dir.path().join("sources");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&sources_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            sources_dir,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn sources_path(&self) -> &Path {
        &self.sources_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("at2.toml")
    }

    /// Writes `at2.toml` into the project directory.
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        let manifest_path = self.manifest_path();
        fs::write(&manifest_path, content)
            .with_context(|| format!("Failed to write manifest to {}", manifest_path.display()))
    }

    /// Creates an (empty) directory relative to the project.
    pub fn create_dir(&self, path: &str) -> Result<PathBuf> {
        let dir = self.project_dir.join(path);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// A local git repository under the sources directory, usable as a clone URL.
    pub fn create_source_repo(&self, name: &str) -> Result<PathBuf> {
        init_git_repo(&self.sources_dir.join(name))
    }

    /// The binary, run from the project directory with colors off.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("at2-recipe").expect("binary is built for tests");
        cmd.current_dir(&self.project_dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
        cmd
    }
}

/// Manifest whose `[external]` table points at `url`, with a short clone timeout.
pub fn manifest_with_external(url: &Path) -> String {
    format!(
        r#"[options]
use_sdl = "OFF"
use_gtest = "OFF"

[external]
url = "{}"
clone_timeout_secs = 60
"#,
        url.display().to_string().replace('\\', "/")
    )
}

/// Whether `tool` is on PATH. Tests that need it return early otherwise.
pub fn tool_available(tool: &str) -> bool {
    let available = which::which(tool).is_ok();
    if !available {
        eprintln!("{tool} not found on PATH, skipping");
    }
    available
}
