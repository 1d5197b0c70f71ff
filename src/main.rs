//! at2-recipe CLI entry point
//!
//! Parses arguments, runs the selected command and turns any failure into a
//! colored error report with exit code 1.
//!
//! - `init` - Write a default at2.toml
//! - `resolve` - Print the requirements for the current options
//! - `fetch` - Clone the external source tree if it is missing
//! - `build` - Resolve, fetch, configure and build

use anyhow::Result;
use at2_recipe::cli;
use at2_recipe::core::user_friendly_error;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
