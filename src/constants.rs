//! Fixed names, versions and defaults used by the recipe.
//!
//! Package versions are the ones the engine is known to build against. The
//! loader-generator settings are passed through to glad untouched.

use std::time::Duration;

/// Default manifest file name, looked up in the current directory.
pub const MANIFEST_FILE: &str = "at2.toml";

/// File written into the build directory for CMake to read.
pub const REQUIREMENTS_FILE: &str = "at2-requirements.toml";

// Option names understood by the resolver.
pub const OPTION_USE_SDL: &str = "use_sdl";
pub const OPTION_USE_ASSIMP: &str = "use_assimp";
pub const OPTION_USE_GTEST: &str = "use_gtest";

/// Every option name the resolver looks at.
pub const RECOGNIZED_OPTIONS: [&str; 3] = [OPTION_USE_SDL, OPTION_USE_ASSIMP, OPTION_USE_GTEST];

// Unconditional requirements (exact versions).
pub const GLM: (&str, &str) = ("glm", "0.9.9.8");
pub const STB: (&str, &str) = ("stb", "20200203");
pub const GLAD: (&str, &str) = ("glad", "0.1.34");
pub const NLOHMANN_JSON: (&str, &str) = ("nlohmann_json", "3.9.1");

// Conditional requirements (minimum versions).
pub const GLFW: (&str, &str) = ("glfw", "3.3.2");
pub const SDL: (&str, &str) = ("sdl", "2.0.14");
pub const GTEST: (&str, &str) = ("gtest", "1.10.0");
pub const ASSIMP: (&str, &str) = ("assimp", "5.0.1");

/// OpenGL version glad generates a loader for.
pub const GLAD_GL_VERSION: &str = "4.5";

/// OpenGL profile glad generates a loader for.
pub const GLAD_GL_PROFILE: &str = "core";

/// Extensions glad must expose in addition to the core profile.
pub const GLAD_EXTENSIONS: [&str; 2] = ["GL_ARB_texture_filter_anisotropic", "GL_KHR_debug"];

// The external source tree that has no package: the header-only gli library.
pub const EXTERNAL_NAME: &str = "gli";
pub const EXTERNAL_URL: &str = "https://github.com/g-truc/gli.git";
pub const EXTERNAL_DIR: &str = "gli";

/// Default CMake binary directory, relative to the project root.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Slow-command threshold for `tools::perf` logging.
pub const SLOW_COMMAND_THRESHOLD: Duration = Duration::from_secs(1);
