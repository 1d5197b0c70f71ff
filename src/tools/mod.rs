//! External tools the recipe drives
//!
//! Two tools are needed: `git` to fetch the external source tree and `cmake`
//! to configure and build the engine. Both are found on `PATH` with the
//! `which` crate; the Windows executable names carry the `.exe` suffix.

pub mod command_builder;

pub use command_builder::{ToolCommand, ToolOutput};

use std::fmt;
use std::path::PathBuf;

use crate::core::{RecipeError, Result};

/// An external executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Git,
    CMake,
}

impl Tool {
    /// Short name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::CMake => "cmake",
        }
    }

    /// Platform-specific executable name.
    #[must_use]
    pub const fn executable(self) -> &'static str {
        match (self, cfg!(windows)) {
            (Self::Git, true) => "git.exe",
            (Self::Git, false) => "git",
            (Self::CMake, true) => "cmake.exe",
            (Self::CMake, false) => "cmake",
        }
    }

    /// Finds the executable on `PATH`.
    pub fn locate(self) -> Result<PathBuf> {
        which::which(self.executable()).map_err(|e| {
            tracing::debug!(target: "tools", "{} not found: {}", self.executable(), e);
            RecipeError::ToolNotFound {
                tool: self.name().to_string(),
            }
        })
    }

    /// Whether the executable is on `PATH`.
    #[must_use]
    pub fn is_installed(self) -> bool {
        self.locate().is_ok()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
