//! Core types shared across at2-recipe
//!
//! Currently this is the error taxonomy. See [`error`] for the full
//! description of how failures are classified and reported.

pub mod error;

pub use error::{ErrorCategory, ErrorContext, RecipeError, user_friendly_error};

/// Result alias used throughout the library.
pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
