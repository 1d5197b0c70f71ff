//! Build options and their tri-state values
//!
//! Options arrive as strings (from `at2.toml` or `-o name=value` on the command
//! line) and are normalized exactly once, at the boundary, by
//! [`OptionValue::parse`]. Anything outside the vocabulary is rejected rather
//! than silently treated as "off".
//!
//! Only the names in [`RECOGNIZED_OPTIONS`] are validated and stored. Other
//! names are ignored with a warning so manifests can carry options meant for
//! other tools.
//!
//! # Examples
//!
//! ```rust
//! use at2_recipe::options::{OptionSet, OptionValue};
//!
//! let options = OptionSet::from_pairs([("use_sdl", "ON"), ("use_gtest", "False")]).unwrap();
//! assert!(options.is_enabled("use_sdl"));
//! assert!(!options.is_enabled("use_gtest"));
//! assert!(!options.is_enabled("use_assimp"));
//! assert_eq!(OptionValue::parse("use_sdl", "TRUE").unwrap(), OptionValue::UpperTrue);
//! ```

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::RECOGNIZED_OPTIONS;
use crate::core::{RecipeError, Result};

/// A tri-state option value in one of its accepted spellings
///
/// The spelling is kept so the value can be written back the way the user
/// wrote it. Semantically every value is a boolean; see
/// [`OptionValue::is_truthy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// `ON`
    On,
    /// `OFF`
    Off,
    /// `True`
    True,
    /// `False`
    False,
    /// `TRUE`
    UpperTrue,
    /// `FALSE`
    UpperFalse,
}

impl OptionValue {
    /// Parses a raw option value. Matching is case-sensitive.
    ///
    /// `name` is only used for the error message.
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        match raw {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            "True" => Ok(Self::True),
            "False" => Ok(Self::False),
            "TRUE" => Ok(Self::UpperTrue),
            "FALSE" => Ok(Self::UpperFalse),
            _ => Err(RecipeError::InvalidOptionValue {
                name: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Whether the value requests the feature.
    #[must_use]
    pub const fn is_truthy(self) -> bool {
        matches!(self, Self::On | Self::True | Self::UpperTrue)
    }

    /// The spelling as it appears in manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::True => "True",
            Self::False => "False",
            Self::UpperTrue => "TRUE",
            Self::UpperFalse => "FALSE",
        }
    }

    /// `ON`/`OFF` form used for CMake cache variables.
    #[must_use]
    pub const fn cmake_bool(enabled: bool) -> &'static str {
        if enabled { "ON" } else { "OFF" }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated build options keyed by name
///
/// Read-only during a resolution run. Missing names are falsy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    /// Creates an empty option set (every option off).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an option set from raw name/value pairs.
    ///
    /// Later pairs replace earlier ones with the same name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.set(name.as_ref(), value.as_ref())?;
        }
        Ok(set)
    }

    /// Sets one option from its raw string value.
    ///
    /// Unrecognized names are ignored and their values are not validated.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        if !is_recognized(name) {
            tracing::warn!(target: "options", "Ignoring unrecognized option '{}'", name);
            return Ok(());
        }
        let value = OptionValue::parse(name, raw)?;
        tracing::trace!(target: "options", "{} = {}", name, value);
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Applies a `name=value` override as given on the command line.
    pub fn apply_override(&mut self, raw: &str) -> Result<()> {
        let (name, value) = parse_override(raw)?;
        self.set(name, value)
    }

    /// Returns the stored value for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<OptionValue> {
        self.values.get(name).copied()
    }

    /// Whether `name` is present and truthy.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_truthy)
    }

    /// Iterates over stored options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of stored (recognized) options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no recognized option was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_recognized(name: &str) -> bool {
    RECOGNIZED_OPTIONS.contains(&name)
}

/// Splits `name=value`. Whitespace around either side is trimmed.
pub fn parse_override(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(RecipeError::InvalidOptionOverride {
            raw: raw.to_string(),
        }),
    }
}
