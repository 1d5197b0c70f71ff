//! Option-driven dependency resolution
//!
//! [`resolve`] turns an [`OptionSet`] into the [`RequirementSet`] for one
//! build. It is a pure function: no I/O, no global state, and the same
//! options always produce an equal set.
//!
//! # Rules
//!
//! Applied in this order:
//!
//! 1. The base packages are always required: glm, stb, glad, nlohmann_json.
//! 2. Exactly one windowing package: sdl when `use_sdl` is truthy, glfw
//!    otherwise.
//! 3. gtest when `use_gtest` is truthy.
//! 4. assimp when `use_assimp` is truthy.
//! 5. glad always gets the loader settings (GL version, profile, extensions).
//!
//! # Examples
//!
//! ```rust
//! use at2_recipe::options::OptionSet;
//! use at2_recipe::resolver::resolve;
//!
//! let options = OptionSet::from_pairs([("use_sdl", "True")]).unwrap();
//! let requirements = resolve(&options);
//!
//! assert!(requirements.contains("sdl"));
//! assert!(!requirements.contains("glfw"));
//! assert!(!requirements.contains("gtest"));
//! ```

use crate::constants::{
    ASSIMP, GLAD, GLAD_EXTENSIONS, GLAD_GL_PROFILE, GLAD_GL_VERSION, GLFW, GLM, GTEST,
    NLOHMANN_JSON, OPTION_USE_ASSIMP, OPTION_USE_GTEST, OPTION_USE_SDL, SDL, STB,
};
use crate::options::OptionSet;
use crate::requirements::{DependencySpec, PackageOption, RequirementSet};

/// Which windowing backend a build uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowingBackend {
    Glfw,
    Sdl,
}

impl WindowingBackend {
    /// Picks the backend from `use_sdl`. GLFW is the default.
    #[must_use]
    pub fn from_options(options: &OptionSet) -> Self {
        if options.is_enabled(OPTION_USE_SDL) { Self::Sdl } else { Self::Glfw }
    }

    /// The package that provides this backend.
    #[must_use]
    pub fn dependency(self) -> DependencySpec {
        let (name, version) = match self {
            Self::Glfw => GLFW,
            Self::Sdl => SDL,
        };
        DependencySpec::minimum(name, version)
    }
}

/// Resolves the requirements for one build.
#[must_use]
pub fn resolve(options: &OptionSet) -> RequirementSet {
    let mut requirements = RequirementSet::new();

    for (name, version) in [GLM, STB, GLAD, NLOHMANN_JSON] {
        requirements.require(DependencySpec::exact(name, version));
    }

    let backend = WindowingBackend::from_options(options);
    tracing::debug!(target: "resolver", "windowing backend: {:?}", backend);
    requirements.require(backend.dependency());

    if options.is_enabled(OPTION_USE_GTEST) {
        requirements.require(DependencySpec::minimum(GTEST.0, GTEST.1));
    }

    if options.is_enabled(OPTION_USE_ASSIMP) {
        requirements.require(DependencySpec::minimum(ASSIMP.0, ASSIMP.1));
    }

    for option in loader_options() {
        requirements.set_package_option(option);
    }

    tracing::info!(
        target: "resolver",
        "Resolved {} requirements: {}",
        requirements.len(),
        requirements.names().collect::<Vec<_>>().join(", ")
    );

    requirements
}

/// Fixed glad settings. Never interpreted here.
fn loader_options() -> [PackageOption; 3] {
    let package = GLAD.0;
    [
        PackageOption::new(package, "gl_version", GLAD_GL_VERSION),
        PackageOption::new(package, "gl_profile", GLAD_GL_PROFILE),
        PackageOption::new(package, "extensions", GLAD_EXTENSIONS.join(",")),
    ]
}
