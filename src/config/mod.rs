//! Effective configuration for one run
//!
//! [`RecipeConfig`] is assembled in layers:
//! 1. built-in defaults
//! 2. `at2.toml` (see [`crate::manifest`])
//! 3. command-line flags via [`ConfigOverrides`]
//!
//! Relative paths in the manifest are taken from the directory the manifest
//! lives in, which is also the project root.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::acquire::ExternalResource;
use crate::build::{BuildSettings, BuildType};
use crate::core::Result;
use crate::imports::ImportRule;
use crate::manifest::Manifest;
use crate::options::OptionSet;

/// Everything a resolution run needs, with all layers applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeConfig {
    /// Project root; holds the engine sources
    pub root: PathBuf,
    pub options: OptionSet,
    pub external: ExternalResource,
    /// No timeout when `None`
    pub clone_timeout: Option<Duration>,
    pub build: BuildSettings,
    /// Where dependency packages live; imports are skipped when `None`
    pub imports_root: Option<PathBuf>,
    pub imports: Vec<ImportRule>,
}

/// Command-line layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `name=value` pairs from `-o`
    pub options: Vec<String>,
    pub build_type: Option<BuildType>,
    pub build_dir: Option<PathBuf>,
    pub clone_timeout_secs: Option<u64>,
}

impl RecipeConfig {
    /// Defaults for a project at `root` with no manifest.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            build: BuildSettings::new(&root),
            root,
            options: OptionSet::new(),
            external: ExternalResource::default(),
            clone_timeout: None,
            imports_root: None,
            imports: ImportRule::defaults(),
        }
    }

    /// Applies `manifest` on top of the defaults.
    ///
    /// Fails on option values outside the tri-state vocabulary.
    pub fn from_manifest(manifest: &Manifest, root: &Path) -> Result<Self> {
        let mut config = Self::new(root);

        config.options = OptionSet::from_pairs(manifest.option_pairs())?;

        let external = &manifest.external;
        if let Some(ref name) = external.name {
            config.external.name.clone_from(name);
        }
        if let Some(ref url) = external.url {
            config.external.url.clone_from(url);
        }
        if let Some(ref dir) = external.dir {
            config.external.dir.clone_from(dir);
        }
        config.clone_timeout = external.clone_timeout_secs.map(Duration::from_secs);

        let build = &manifest.build;
        if let Some(build_type) = build.build_type {
            config.build.build_type = build_type;
        }
        if let Some(ref dir) = build.build_dir {
            config.build.build_dir = root.join(dir);
        }
        config.build.generator.clone_from(&build.generator);
        config.build.jobs = build.jobs;
        config.imports_root = build.imports_root.as_ref().map(|dir| root.join(dir));

        if let Some(ref rules) = manifest.imports {
            config.imports.clone_from(rules);
        }

        Ok(config)
    }

    /// Loads `manifest_path`, which must exist.
    ///
    /// The manifest's directory becomes the project root.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        Self::from_manifest(&manifest, &root_of(manifest_path))
    }

    /// Like [`RecipeConfig::load`], but a missing manifest yields the defaults.
    pub fn load_or_default(manifest_path: &Path) -> Result<Self> {
        let manifest = Manifest::load_or_default(manifest_path)?;
        Self::from_manifest(&manifest, &root_of(manifest_path))
    }

    /// Applies the command-line layer.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        for raw in &overrides.options {
            self.options.apply_override(raw)?;
        }
        if let Some(build_type) = overrides.build_type {
            self.build.build_type = build_type;
        }
        if let Some(ref dir) = overrides.build_dir {
            self.build.build_dir = self.root.join(dir);
        }
        if let Some(secs) = overrides.clone_timeout_secs {
            self.clone_timeout = Some(Duration::from_secs(secs));
        }
        Ok(())
    }
}

fn root_of(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
