//! Error handling for at2-recipe
//!
//! Every fallible operation in the library returns [`RecipeError`]. The CLI
//! boundary works with [`anyhow::Error`] and turns whatever bubbles up into an
//! [`ErrorContext`] via [`user_friendly_error`], which adds a short explanation
//! and a suggestion before printing.
//!
//! # Error Categories
//!
//! Variants are grouped by [`ErrorCategory`]:
//! - **Configuration**: bad option values, unreadable manifests, misuse of a
//!   resolution run
//! - **Acquisition**: the fetch-if-absent step for the external source tree
//! - **Delegation**: the external build system's `configure` and `build` steps
//! - **Environment**: missing tools and filesystem failures
//!
//! None of these are retried. A failure in any step aborts the run and the
//! binary exits non-zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use at2_recipe::core::{ErrorCategory, RecipeError, user_friendly_error};
//!
//! let error = RecipeError::CloneFailed {
//!     url: "https://github.com/g-truc/gli.git".to_string(),
//!     reason: "Could not resolve host".to_string(),
//! };
//! assert_eq!(error.category(), ErrorCategory::Acquisition);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`RecipeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid input: options, manifest, or API misuse.
    Configuration,
    /// Fetching the external source tree failed.
    Acquisition,
    /// The external build system failed.
    Delegation,
    /// The host environment is missing something (tools, files, permissions).
    Environment,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Acquisition => "acquisition",
            Self::Delegation => "delegation",
            Self::Environment => "environment",
        };
        f.write_str(name)
    }
}

/// The main error type for at2-recipe operations
///
/// Each variant carries the values a user needs to understand the failure
/// (option names, URLs, paths, tool stderr). Output captured from external
/// tools is kept verbatim so nothing is lost in translation.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// A recognized option was given a value outside the tri-state vocabulary.
    ///
    /// Accepted spellings are `ON`, `OFF`, `True`, `False`, `TRUE` and `FALSE`.
    #[error("Invalid value '{value}' for option '{name}' (expected one of ON, OFF, True, False, TRUE, FALSE)")]
    InvalidOptionValue {
        /// Option name, e.g. `use_sdl`
        name: String,
        /// The rejected value as written
        value: String,
    },

    /// A `-o` override was not of the form `name=value`.
    #[error("Invalid option override '{raw}' (expected name=value)")]
    InvalidOptionOverride {
        /// The override as passed on the command line
        raw: String,
    },

    /// The recipe manifest exists but could not be parsed.
    #[error("Failed to parse manifest {file}: {reason}")]
    ManifestParseError {
        /// Manifest path
        file: String,
        /// Parser message
        reason: String,
    },

    /// A manifest named on the command line does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound {
        /// Path that was looked up
        path: String,
    },

    /// `init` refused to overwrite an existing manifest.
    #[error("Manifest already exists: {path}")]
    ManifestExists {
        /// Path of the existing manifest
        path: String,
    },

    /// An import rule's glob pattern does not compile.
    #[error("Invalid import pattern '{pattern}': {reason}")]
    InvalidImportPattern {
        /// The pattern as written
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// A resolution run was driven out of order.
    #[error("Resolution run is {actual}, expected {expected}")]
    InvalidRunState {
        /// State the operation requires
        expected: String,
        /// State the run was actually in
        actual: String,
    },

    /// Cloning the external source tree failed.
    #[error("Failed to clone {url}: {reason}")]
    CloneFailed {
        /// Repository URL
        url: String,
        /// stderr from git
        reason: String,
    },

    /// An external command did not finish within its configured timeout.
    #[error("{tool} {operation} timed out after {seconds}s")]
    CommandTimedOut {
        /// Tool name (`git`, `cmake`)
        tool: String,
        /// Sub-operation, e.g. `clone`
        operation: String,
        /// Configured timeout
        seconds: u64,
    },

    /// An external command was cancelled before it finished.
    #[error("{operation} was cancelled")]
    Cancelled {
        /// What was running
        operation: String,
    },

    /// `cmake` configure step failed.
    #[error("CMake configure failed: {reason}")]
    ConfigureFailed {
        /// stderr from cmake, or the reason the step could not start
        reason: String,
    },

    /// `cmake --build` step failed.
    #[error("CMake build failed: {reason}")]
    BuildFailed {
        /// stderr from cmake
        reason: String,
    },

    /// A required executable is not on `PATH`.
    #[error("{tool} is not installed or not found in PATH")]
    ToolNotFound {
        /// Executable name
        tool: String,
    },

    /// Some other external command exited non-zero.
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed {
        /// Command line as run
        command: String,
        /// stderr from the command
        reason: String,
    },

    /// A filesystem operation failed with a known path.
    #[error("File system error during {operation} at {path}: {reason}")]
    FileSystemError {
        /// What was being done (e.g. "copy runtime library")
        operation: String,
        /// Path involved
        path: String,
        /// Underlying message
        reason: String,
    },

    /// I/O error without more specific context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RecipeError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOptionValue { .. }
            | Self::InvalidOptionOverride { .. }
            | Self::ManifestParseError { .. }
            | Self::ManifestNotFound { .. }
            | Self::ManifestExists { .. }
            | Self::InvalidImportPattern { .. }
            | Self::InvalidRunState { .. } => ErrorCategory::Configuration,
            Self::CloneFailed { .. } | Self::Cancelled { .. } | Self::CommandTimedOut { .. } => {
                ErrorCategory::Acquisition
            }
            Self::ConfigureFailed { .. } | Self::BuildFailed { .. } => ErrorCategory::Delegation,
            Self::ToolNotFound { .. }
            | Self::CommandFailed { .. }
            | Self::FileSystemError { .. }
            | Self::IoError(_) => {
                ErrorCategory::Environment
            }
        }
    }

    /// Builds a [`RecipeError::FileSystemError`] from an I/O error and a path.
    pub fn fs(
        operation: impl Into<String>,
        path: impl AsRef<std::path::Path>,
        error: &std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.as_ref().display().to_string(),
            reason: error.to_string(),
        }
    }
}

/// Error wrapper with a user-facing explanation and suggestion
///
/// Produced by [`user_friendly_error`] and printed by the binary on failure.
#[derive(Debug)]
pub struct ErrorContext {
    /// Rendered message of the underlying error
    pub message: String,
    /// Category, when the error came from this crate
    pub category: Option<ErrorCategory>,
    /// Actionable next step
    pub suggestion: Option<String>,
    /// Why this usually happens
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wraps an error message with no extra context.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: None,
            suggestion: None,
            details: None,
        }
    }

    /// Adds a suggestion line.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds a details line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Converts any error into an [`ErrorContext`] for display
///
/// The first [`RecipeError`] found in the chain decides the suggestion. Any
/// outer `anyhow` context is kept in the message so the user still sees what
/// step was running.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format!("{error:#}");

    if let Some(recipe_error) = error.chain().find_map(|e| e.downcast_ref::<RecipeError>()) {
        return create_error_context(recipe_error, message);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(message)
                .with_suggestion("Check ownership of the project and build directories")
                .with_details("at2-recipe needs write access to create the build tree");
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: &RecipeError, message: String) -> ErrorContext {
    let mut ctx = ErrorContext::new(message);
    ctx.category = Some(error.category());

    match error {
        RecipeError::InvalidOptionValue { name, .. } => ctx
            .with_suggestion(format!("Set {name} to ON or OFF in at2.toml or with -o {name}=ON"))
            .with_details("Option values are case-sensitive; only ON, OFF, True, False, TRUE and FALSE are accepted"),

        RecipeError::InvalidOptionOverride { .. } => ctx
            .with_suggestion("Pass overrides as -o name=value, for example -o use_sdl=ON"),

        RecipeError::ManifestParseError { file, .. } => ctx
            .with_suggestion(format!(
                "Check the TOML syntax in {file}. Option values are strings such as \"ON\" or booleans"
            ))
            .with_details("Run 'at2-recipe init --force' to regenerate a default manifest"),

        RecipeError::ManifestNotFound { path } => ctx
            .with_suggestion(format!(
                "Check the --manifest-path argument, or run 'at2-recipe --manifest-path {path} init' to create it"
            ))
            .with_details("Only the default ./at2.toml may be absent; the defaults are used in that case"),

        RecipeError::ManifestExists { .. } => ctx
            .with_suggestion("Use --force to overwrite the existing manifest"),

        RecipeError::CloneFailed { url, .. } => ctx
            .with_suggestion(format!(
                "Verify the repository URL is correct: {url}. Check your internet connection and repository access"
            ))
            .with_details("A partially cloned directory is treated as present on the next run; delete it before retrying"),

        RecipeError::CommandTimedOut { .. } => ctx
            .with_suggestion("Raise --clone-timeout or remove external.clone_timeout_secs from at2.toml")
            .with_details("Timeouts are opt-in; slow networks may need a larger limit"),

        RecipeError::Cancelled { .. } => ctx
            .with_details("The clone was interrupted; remove any partial directory before retrying"),

        RecipeError::ConfigureFailed { .. } => ctx
            .with_suggestion("Run cmake manually in the build directory with --verbose for full output")
            .with_details("The resolved requirements are written to at2-requirements.toml in the build directory"),

        RecipeError::BuildFailed { .. } => ctx
            .with_suggestion("Inspect the compiler output above; re-run with --verbose for the full cmake command line"),

        RecipeError::ToolNotFound { tool } => ctx
            .with_suggestion(format!("Install {tool} and make sure it is on your PATH"))
            .with_details("at2-recipe shells out to git for fetching and cmake for building"),

        RecipeError::InvalidImportPattern { .. } => ctx
            .with_suggestion("Fix the pattern in the [[imports]] table of at2.toml, e.g. \"*.dll\""),

        RecipeError::InvalidRunState { .. }
        | RecipeError::CommandFailed { .. }
        | RecipeError::FileSystemError { .. }
        | RecipeError::IoError(_) => ctx,
    }
}
