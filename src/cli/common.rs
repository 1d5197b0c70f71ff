//! Common utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{ConfigOverrides, RecipeConfig};
use crate::constants::MANIFEST_FILE;

/// Manifest location and the configuration layered on top of it.
#[derive(Debug)]
pub struct CommandContext {
    pub manifest_path: PathBuf,
    pub config: RecipeConfig,
}

impl CommandContext {
    /// Loads the manifest and applies `overrides`.
    ///
    /// A missing `./at2.toml` means defaults; a missing explicit
    /// `--manifest-path` is an error.
    pub fn load(manifest_path: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<Self> {
        let explicit = manifest_path.is_some();
        let manifest_path = resolve_manifest_path(manifest_path);

        let loaded = if explicit {
            RecipeConfig::load(&manifest_path)
        } else {
            RecipeConfig::load_or_default(&manifest_path)
        };
        let mut config = loaded.with_context(|| {
            format!("Failed to load configuration from {}", manifest_path.display())
        })?;
        config.apply_overrides(overrides).context("Invalid command-line override")?;

        tracing::debug!(
            "Project root {}, {} option(s) set",
            config.root.display(),
            config.options.len()
        );

        Ok(Self {
            manifest_path,
            config,
        })
    }
}

/// The manifest path given on the command line, or `./at2.toml`.
#[must_use]
pub fn resolve_manifest_path(manifest_path: Option<PathBuf>) -> PathBuf {
    manifest_path.unwrap_or_else(|| Path::new(".").join(MANIFEST_FILE))
}

/// Completes when the user presses Ctrl-C.
///
/// If the signal handler cannot be installed this never completes, so the
/// caller simply runs without cancellation.
pub async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    tracing::warn!("Interrupted, cancelling");
}
