//! Resolved requirements handed to the build system
//!
//! A [`RequirementSet`] is the output of one resolution run: an ordered list
//! of [`DependencySpec`]s plus the [`PackageOption`]s passed through to
//! individual packages. Both lists are append-only and keep insertion order,
//! which is the order CMake sees them in.
//!
//! References use the package-manager notation:
//! - `glm/0.9.9.8` for an exact version
//! - `glfw/[>=3.3.2]` for a minimum version

use serde::{Serialize, Serializer};
use std::fmt;

/// Version requirement on a single package.
///
/// Versions are opaque strings; package versions such as `0.9.9.8` or
/// `20200203` are not semver and are never compared here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionConstraint {
    /// Exactly this version.
    Exact(String),
    /// This version or newer.
    Minimum(String),
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::Minimum(v) => write!(f, "[>={v}]"),
        }
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One required package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencySpec {
    /// Package name, e.g. `glfw`
    pub name: String,
    /// Version requirement
    pub version: VersionConstraint,
}

impl DependencySpec {
    /// A dependency pinned to one version.
    pub fn exact(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: VersionConstraint::Exact(version.into()),
        }
    }

    /// A dependency with a lower version bound.
    pub fn minimum(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: VersionConstraint::Minimum(version.into()),
        }
    }

    /// Package-manager reference, e.g. `glfw/[>=3.3.2]`.
    #[must_use]
    pub fn reference(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// An option passed through, uninterpreted, to one package's own build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageOption {
    /// Package the option belongs to
    pub package: String,
    /// Option key
    pub key: String,
    /// Option value
    pub value: String,
}

impl PackageOption {
    pub fn new(
        package: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for PackageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.package, self.key, self.value)
    }
}

/// Ordered output of a resolution run
///
/// Entries are never removed or reordered. Pushing the same dependency twice
/// keeps both entries; one resolution run never does that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementSet {
    requires: Vec<DependencySpec>,
    options: Vec<PackageOption>,
}

impl RequirementSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dependency.
    pub fn require(&mut self, spec: DependencySpec) {
        tracing::debug!(target: "resolver", "requires {}", spec);
        self.requires.push(spec);
    }

    /// Appends a package option.
    pub fn set_package_option(&mut self, option: PackageOption) {
        tracing::debug!(target: "resolver", "option {}", option);
        self.options.push(option);
    }

    /// Dependencies in declaration order.
    #[must_use]
    pub fn requires(&self) -> &[DependencySpec] {
        &self.requires
    }

    /// Package options in declaration order.
    #[must_use]
    pub fn package_options(&self) -> &[PackageOption] {
        &self.options
    }

    /// Looks up a dependency by package name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.requires.iter().find(|spec| spec.name == name)
    }

    /// Whether a package with this name is required.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Package names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.requires.iter().map(|spec| spec.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requires.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }
}
