//! Test utilities for at2-recipe
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite:
//! - [`init_test_logging`] for opt-in tracing output
//! - recording fakes for the fetcher and build system
//! - helpers that create local git repositories to clone from

pub mod git_helper;
pub mod mocks;

pub use git_helper::{TestGit, init_git_repo};
pub use mocks::{BuildCall, RecordingBuildSystem, RecordingFetcher};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests stay silent.
///
/// ```bash
/// RUST_LOG=acquire=debug,tools=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
