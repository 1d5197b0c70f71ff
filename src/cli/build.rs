//! Resolve, fetch, configure and build.
//!
//! The full resolution run. Steps are strictly sequential and the first
//! failure stops everything after it.
//!
//! ```bash
//! at2-recipe build
//! at2-recipe build -o use_assimp=ON --build-type Debug
//! at2-recipe build --build-dir out --skip-imports
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{CommandContext, interrupted};
use crate::acquire::{AcquireOutcome, GitFetcher};
use crate::build::{BuildType, CMake};
use crate::config::ConfigOverrides;
use crate::constants::GTEST;
use crate::pipeline::ResolutionRun;

#[derive(Args)]
pub struct BuildCommand {
    /// Override a build option, e.g. `-o use_sdl=ON` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    options: Vec<String>,

    /// CMake build type (Debug, Release, RelWithDebInfo, MinSizeRel)
    #[arg(long)]
    build_type: Option<BuildType>,

    /// Build directory, relative to the project root
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Give up on the clone after this many seconds
    #[arg(long, value_name = "SECS")]
    clone_timeout: Option<u64>,

    /// Do not copy runtime libraries after the build
    #[arg(long)]
    skip_imports: bool,
}

impl BuildCommand {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            options: self.options.clone(),
            build_type: self.build_type,
            build_dir: self.build_dir.clone(),
            clone_timeout_secs: self.clone_timeout,
        }
    }

    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let mut ctx = CommandContext::load(manifest_path, &self.overrides())?;
        if self.skip_imports {
            ctx.config.imports_root = None;
        }
        let config = &ctx.config;

        let fetcher = GitFetcher::new().with_timeout(config.clone_timeout);
        let mut run = ResolutionRun::new(config, fetcher, CMake::new());

        let report = run
            .execute(interrupted())
            .await
            .with_context(|| format!("Build failed (run {})", run.state()))?;

        if report.acquisition == AcquireOutcome::Fetched {
            println!("{} Fetched {}", "✓".green(), config.external.name);
        }
        println!(
            "{} Configured with {} requirement(s)",
            "✓".green(),
            report.requirements.len()
        );
        for path in &report.imported {
            println!("  imported {}", path.display());
        }
        println!(
            "{} Built {} in {}",
            "✓".green(),
            config.build.build_type,
            config.build.build_dir.display()
        );
        if report.requirements.contains(GTEST.0) {
            println!("  Test targets enabled; run {} in the build directory", "ctest".bright_white());
        }
        Ok(())
    }
}
