//! The `at2.toml` recipe manifest
//!
//! Every table is optional; a missing manifest is the same as an empty one.
//!
//! ```toml
//! [options]
//! use_sdl = "OFF"
//! use_gtest = "ON"
//! use_assimp = "OFF"
//!
//! [external]
//! name = "gli"
//! url = "https://github.com/g-truc/gli.git"
//! dir = "gli"
//! clone_timeout_secs = 600
//!
//! [build]
//! build_type = "Release"
//! build_dir = "build"
//! generator = "Ninja"
//! jobs = 8
//! imports_root = "deps"
//!
//! [[imports]]
//! pattern = "*.dll"
//! src = "bin"
//! dst = "bin"
//! ```
//!
//! Option values are normally strings. TOML booleans are accepted and read as
//! `True`/`False`; any other value type is rejected when the options are
//! validated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::build::BuildType;
use crate::core::{RecipeError, Result};
use crate::imports::ImportRule;

/// Parsed `at2.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Raw build options, validated later by `OptionSet`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, toml::Value>,

    #[serde(default)]
    pub external: ExternalSection,

    #[serde(default)]
    pub build: BuildSection,

    /// Replaces the default import rules when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<ImportRule>>,
}

/// `[external]`: where the extra source tree comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// No timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_timeout_secs: Option<u64>,
}

/// `[build]`: CMake settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_type: Option<BuildType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
    /// Directory holding dependency packages; imports are skipped when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports_root: Option<PathBuf>,
}

impl Manifest {
    /// Parses manifest text. `file` is only used in error messages.
    pub fn parse(content: &str, file: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RecipeError::ManifestParseError {
            file: file.to_string(),
            reason: e.message().to_string(),
        })
    }

    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RecipeError::ManifestNotFound {
                    path: path.display().to_string(),
                }
            } else {
                RecipeError::fs("read manifest", path, &e)
            }
        })?;
        let manifest = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(target: "manifest", "Loaded {}", path.display());
        Ok(manifest)
    }

    /// Like [`Manifest::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(target: "manifest", "{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Option values as strings, ready for `OptionSet::set`.
    ///
    /// Booleans map to `True`/`False`. Other non-string values are rendered
    /// with their TOML syntax so validation can report them.
    #[must_use]
    pub fn option_pairs(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(name, value)| {
                let raw = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Boolean(true) => "True".to_string(),
                    toml::Value::Boolean(false) => "False".to_string(),
                    other => other.to_string(),
                };
                (name.clone(), raw)
            })
            .collect()
    }

    /// The manifest written by `at2-recipe init`.
    #[must_use]
    pub fn template() -> &'static str {
        r#"# at2-recipe manifest

[options]
# Use SDL instead of GLFW for windowing
use_sdl = "OFF"
# Build the test suite (requires gtest)
use_gtest = "ON"
# Enable model import (requires assimp)
use_assimp = "OFF"

[external]
name = "gli"
url = "https://github.com/g-truc/gli.git"
dir = "gli"
# clone_timeout_secs = 600

[build]
build_type = "Release"
build_dir = "build"
# generator = "Ninja"
# jobs = 8
# imports_root = "deps"
"#
    }
}
