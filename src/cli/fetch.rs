//! Clone the external source tree if it is missing.
//!
//! Runs only the acquisition step of a build. An existing directory is
//! trusted as-is; nothing is pulled or verified.
//!
//! ```bash
//! at2-recipe fetch
//! at2-recipe fetch --clone-timeout 600
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{CommandContext, interrupted};
use crate::acquire::{AcquireOutcome, GitFetcher, acquire};
use crate::config::ConfigOverrides;

#[derive(Args)]
pub struct FetchCommand {
    /// Give up on the clone after this many seconds
    #[arg(long, value_name = "SECS")]
    clone_timeout: Option<u64>,
}

impl FetchCommand {
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let overrides = ConfigOverrides {
            clone_timeout_secs: self.clone_timeout,
            ..ConfigOverrides::default()
        };
        let ctx = CommandContext::load(manifest_path, &overrides)?;
        let config = &ctx.config;

        let fetcher = GitFetcher::new().with_timeout(config.clone_timeout);
        let outcome = acquire(&config.external, &config.root, &fetcher, interrupted())
            .await
            .with_context(|| format!("Failed to acquire {}", config.external.name))?;

        let target = config.external.target_in(&config.root);
        match outcome {
            AcquireOutcome::AlreadyPresent => println!(
                "{} {} already present at {}",
                "✓".green(),
                config.external.name,
                target.display()
            ),
            AcquireOutcome::Fetched => println!(
                "{} Fetched {} into {}",
                "✓".green(),
                config.external.name,
                target.display()
            ),
        }
        Ok(())
    }
}
