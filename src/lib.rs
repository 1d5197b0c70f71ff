//! at2-recipe - build recipe for the AT2 graphics engine
//!
//! Resolves the third-party libraries the engine needs from a handful of build
//! options, fetches the one dependency that has no package (the header-only
//! `gli` texture library) if it is missing, and hands everything to CMake.
//!
//! # Architecture Overview
//!
//! A build is one [`pipeline::ResolutionRun`]:
//!
//! 1. `at2.toml` and command-line flags are layered into a
//!    [`config::RecipeConfig`].
//! 2. [`resolver::resolve`] turns the validated [`options::OptionSet`] into a
//!    [`requirements::RequirementSet`]. This step is pure.
//! 3. [`acquire::acquire`] clones `gli` unless its directory already exists.
//! 4. A [`build::BuildSystem`] runs `configure` and `build`.
//! 5. Runtime libraries are copied next to the executables ([`imports`]).
//!
//! Any failure aborts the run. Nothing is retried.
//!
//! # Core Modules
//!
//! - [`options`] - Tri-state build options and their strict parser
//! - [`requirements`] - Dependency specs, package options, requirement sets
//! - [`resolver`] - Option-driven dependency resolution
//! - [`acquire`] - Fetch-if-absent for the external source tree
//! - [`build`] - CMake delegation
//! - [`imports`] - Post-build runtime-library copying
//! - [`pipeline`] - The resolution run state machine
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Layered configuration
//! - [`manifest`] - `at2.toml` parsing
//! - [`core`] - Error types and user-facing error reporting
//! - [`tools`] - Running `git` and `cmake`
//! - [`constants`] - Package versions and fixed names
//!
//! # Manifest Format (at2.toml)
//!
//! ```toml
//! [options]
//! use_sdl = "OFF"
//! use_gtest = "ON"
//! use_assimp = "OFF"
//! ```
//!
//! See [`manifest`] for every table.
//!
//! # Command-Line Usage
//!
//! ```bash
//! at2-recipe init
//! at2-recipe resolve -o use_sdl=ON --format json
//! at2-recipe fetch --clone-timeout 600
//! at2-recipe build --build-type Debug
//! ```

// Core functionality modules
pub mod acquire;
pub mod build;
pub mod options;
pub mod pipeline;
pub mod requirements;
pub mod resolver;

// Configuration and I/O
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod imports;
pub mod manifest;
pub mod tools;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
