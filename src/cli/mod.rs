//! Command-line interface for at2-recipe.
//!
//! Each command lives in its own module with its own argument struct and an
//! `execute_with_manifest_path` entry point, so commands can be driven from
//! tests without going through argument parsing.
//!
//! # Available Commands
//!
//! - `init` - Write a default `at2.toml`
//! - `resolve` - Print the requirement set for the current options
//! - `fetch` - Clone the external source tree if it is missing
//! - `build` - Resolve, fetch, configure and build
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--manifest-path` - Use a manifest other than `./at2.toml`
//!
//! `RUST_LOG` takes precedence over both logging flags. Logs go to stderr so
//! `resolve --format json` stays machine-readable.
//!
//! # Example
//!
//! ```bash
//! at2-recipe init
//! at2-recipe resolve -o use_sdl=ON
//! at2-recipe build --build-type Debug --verbose
//! ```

mod build;
pub mod common;
mod fetch;
mod init;
mod resolve;

pub use resolve::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive for the log subscriber
    pub log_level: String,
}

impl CliConfig {
    /// Installs the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "at2-recipe",
    about = "Build recipe for the AT2 graphics engine",
    version,
    long_about = "Resolves the libraries AT2 needs from its build options, fetches the gli \
                  source tree when it is missing and drives CMake."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to at2.toml; must exist unless it is the default ./at2.toml
    #[arg(long, global = true)]
    manifest_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default at2.toml
    Init(init::InitCommand),

    /// Print the requirements the current options resolve to
    Resolve(resolve::ResolveCommand),

    /// Clone the external source tree if it is missing
    Fetch(fetch::FetchCommand),

    /// Resolve, fetch, configure and build
    Build(build::BuildCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Maps the global flags onto a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        tracing::debug!("Log level: {}", config.log_level);

        match self.command {
            Commands::Init(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Resolve(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Fetch(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Build(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
        }
    }
}
