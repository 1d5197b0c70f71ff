//! Write a default `at2.toml`.
//!
//! Also adds the build directory and the cloned `gli` tree to `.gitignore`.
//!
//! ```bash
//! at2-recipe init
//! at2-recipe init --force
//! at2-recipe --manifest-path engine/at2.toml init
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use super::common::resolve_manifest_path;
use crate::constants::{DEFAULT_BUILD_DIR, EXTERNAL_DIR};
use crate::core::RecipeError;
use crate::manifest::Manifest;

const GITIGNORE_MARKER: &str = "# at2-recipe managed directories";

#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing manifest
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = resolve_manifest_path(manifest_path);

        if manifest_path.exists() && !self.force {
            return Err(RecipeError::ManifestExists {
                path: manifest_path.display().to_string(),
            }
            .into());
        }

        let target_dir = match manifest_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(|e| RecipeError::fs("create", &target_dir, &e))?;
        }

        fs::write(&manifest_path, Manifest::template())
            .map_err(|e| RecipeError::fs("write", &manifest_path, &e))?;

        if update_gitignore(&target_dir.join(".gitignore"))
            .context("Failed to update .gitignore")?
        {
            println!("{} Updated .gitignore with at2-recipe entries", "✓".green());
        }

        println!("{} Initialized at2.toml at {}", "✓".green(), manifest_path.display());

        println!("\n{}", "Next steps:".cyan());
        println!("  Adjust the [options] table, then run {}", "at2-recipe build".bright_white());
        println!("  Preview the dependencies with {}", "at2-recipe resolve".bright_white());

        Ok(())
    }
}

/// Appends the managed entries unless the marker is already there.
///
/// Returns whether the file was written.
fn update_gitignore(path: &Path) -> Result<bool> {
    let mut content = if path.exists() {
        fs::read_to_string(path).map_err(|e| RecipeError::fs("read", path, &e))?
    } else {
        String::new()
    };

    if content.contains(GITIGNORE_MARKER) {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str(GITIGNORE_MARKER);
    content.push('\n');

    for entry in [format!("/{DEFAULT_BUILD_DIR}/"), format!("/{EXTERNAL_DIR}/")] {
        if !content.lines().any(|line| line.trim() == entry) {
            content.push_str(&entry);
            content.push('\n');
        }
    }

    fs::write(path, content).map_err(|e| RecipeError::fs("write", path, &e))?;
    Ok(true)
}
