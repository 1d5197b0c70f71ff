//! Integration test suite for at2-recipe
//!
//! End-to-end tests that run the compiled binary against temporary project
//! directories. None of them need network access; tests that need `git` or
//! `cmake` skip themselves when the tool is missing.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **init**: Manifest creation and .gitignore handling
//! - **resolve**: Option-driven requirement output
//! - **fetch**: Acquisition of the external source tree
//! - **build**: Full runs and their failure modes
//! - **error_scenarios**: Invalid input and error reporting

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod build;
mod error_scenarios;
mod fetch;
mod init;
mod resolve;
