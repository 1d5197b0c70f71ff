//! Print the requirement set for the current options.
//!
//! Resolution is pure, so this command touches nothing on disk apart from
//! reading the manifest. It shows exactly what `build` would hand to CMake.
//!
//! ```bash
//! at2-recipe resolve
//! at2-recipe resolve -o use_sdl=ON -o use_gtest=OFF
//! at2-recipe resolve --format json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::CommandContext;
use crate::config::ConfigOverrides;
use crate::options::OptionSet;
use crate::requirements::RequirementSet;
use crate::resolver::resolve;

/// How `resolve` prints its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One requirement per line
    #[default]
    Text,
    /// A single JSON object with `options`, `requires` and `package_options`
    Json,
}

#[derive(Args)]
pub struct ResolveCommand {
    /// Override a build option, e.g. `-o use_sdl=ON` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    options: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ResolveCommand {
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let overrides = ConfigOverrides {
            options: self.options,
            ..ConfigOverrides::default()
        };
        let ctx = CommandContext::load(manifest_path, &overrides)?;
        let requirements = resolve(&ctx.config.options);

        match self.format {
            OutputFormat::Text => print_text(&ctx.config.options, &requirements),
            OutputFormat::Json => {
                println!("{}", render_json(&ctx.config.options, &requirements)?);
            }
        }
        Ok(())
    }
}

fn print_text(options: &OptionSet, requirements: &RequirementSet) {
    if !options.is_empty() {
        println!("{}", "Options:".cyan());
        for (name, value) in options.iter() {
            println!("  {name} = {value}");
        }
        println!();
    }

    println!("{} ({}):", "Requirements".cyan(), requirements.len());
    for spec in requirements.requires() {
        println!("  {}", spec.reference().bright_white());
    }

    if !requirements.package_options().is_empty() {
        println!("\n{}", "Package options:".cyan());
        for option in requirements.package_options() {
            println!("  {option}");
        }
    }
}

/// The JSON document printed by `--format json`.
pub fn render_json(options: &OptionSet, requirements: &RequirementSet) -> Result<String> {
    let document = serde_json::json!({
        "options": options,
        "requires": requirements
            .requires()
            .iter()
            .map(crate::requirements::DependencySpec::reference)
            .collect::<Vec<_>>(),
        "package_options": requirements.package_options(),
    });
    serde_json::to_string_pretty(&document).context("Failed to serialize requirements")
}
