//! Delegation to the external build system
//!
//! After resolution the recipe hands the [`RequirementSet`] to a
//! [`BuildSystem`] in two steps: `configure` then `build`. Either may fail;
//! failures are returned as-is and never retried.
//!
//! [`CMake`] is the real implementation. It writes the resolved requirements
//! to `at2-requirements.toml` in the build directory and passes the option
//! switches as cache variables:
//!
//! | Option       | Cache variable            |
//! |--------------|---------------------------|
//! | `use_sdl`    | `USE_SDL_INSTEADOF_GLFW`  |
//! | `use_assimp` | `USE_ASSIMP`              |
//! | `use_gtest`  | `AT2_BUILD_TESTS`         |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_BUILD_DIR, OPTION_USE_ASSIMP, OPTION_USE_GTEST, OPTION_USE_SDL, REQUIREMENTS_FILE,
};
use crate::core::{RecipeError, Result};
use crate::options::{OptionSet, OptionValue};
use crate::requirements::RequirementSet;
use crate::tools::ToolCommand;

/// CMake build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Debug" => Ok(Self::Debug),
            "Release" => Ok(Self::Release),
            "RelWithDebInfo" => Ok(Self::RelWithDebInfo),
            "MinSizeRel" => Ok(Self::MinSizeRel),
            other => Err(format!(
                "unknown build type '{other}' (expected Debug, Release, RelWithDebInfo or MinSizeRel)"
            )),
        }
    }
}

/// Where and how to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Directory holding the engine's top-level `CMakeLists.txt`
    pub source_dir: PathBuf,
    /// CMake binary directory
    pub build_dir: PathBuf,
    pub build_type: BuildType,
    /// CMake generator (`-G`); CMake picks one when unset
    pub generator: Option<String>,
    /// `--parallel` job count
    pub jobs: Option<usize>,
}

impl BuildSettings {
    /// Defaults for a project rooted at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        Self {
            build_dir: source_dir.join(DEFAULT_BUILD_DIR),
            source_dir,
            build_type: BuildType::default(),
            generator: None,
            jobs: None,
        }
    }

    /// Path of the requirements file written by `configure`.
    #[must_use]
    pub fn requirements_file(&self) -> PathBuf {
        self.build_dir.join(REQUIREMENTS_FILE)
    }
}

/// The two-step external build collaborator.
pub trait BuildSystem {
    /// Translates requirements and options into build-system input.
    fn configure(
        &self,
        requirements: &RequirementSet,
        options: &OptionSet,
        settings: &BuildSettings,
    ) -> impl Future<Output = Result<()>>;

    /// Compiles.
    fn build(&self, settings: &BuildSettings) -> impl Future<Output = Result<()>>;
}

/// Drives the `cmake` executable.
#[derive(Debug, Clone, Default)]
pub struct CMake;

impl CMake {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The configure command line for these inputs.
    #[must_use]
    pub fn configure_command(options: &OptionSet, settings: &BuildSettings) -> ToolCommand {
        let mut cmd = ToolCommand::cmake_configure(&settings.source_dir, &settings.build_dir);
        if let Some(ref generator) = settings.generator {
            cmd = cmd.args(["-G", generator.as_str()]);
        }

        let switch = |name: &str| OptionValue::cmake_bool(options.is_enabled(name));
        cmd.args([
            format!("-DCMAKE_BUILD_TYPE={}", settings.build_type),
            format!("-DUSE_SDL_INSTEADOF_GLFW={}", switch(OPTION_USE_SDL)),
            format!("-DUSE_ASSIMP={}", switch(OPTION_USE_ASSIMP)),
            format!("-DAT2_BUILD_TESTS={}", switch(OPTION_USE_GTEST)),
            format!("-DAT2_REQUIREMENTS_FILE={}", settings.requirements_file().display()),
        ])
        .with_context("configure")
    }

    /// The build command line for these settings.
    #[must_use]
    pub fn build_command(settings: &BuildSettings) -> ToolCommand {
        let mut cmd = ToolCommand::cmake_build(&settings.build_dir, settings.build_type.as_str());
        if let Some(jobs) = settings.jobs {
            cmd = cmd.args(["--parallel".to_string(), jobs.to_string()]);
        }
        cmd.inherit_stdio().with_context("build")
    }
}

impl BuildSystem for CMake {
    async fn configure(
        &self,
        requirements: &RequirementSet,
        options: &OptionSet,
        settings: &BuildSettings,
    ) -> Result<()> {
        write_requirements_file(requirements, settings).await?;
        tracing::info!(
            target: "build",
            "Configuring {} ({}) in {}",
            settings.source_dir.display(),
            settings.build_type,
            settings.build_dir.display()
        );
        Self::configure_command(options, settings).execute_success().await
    }

    async fn build(&self, settings: &BuildSettings) -> Result<()> {
        tracing::info!(target: "build", "Building {} in {}", settings.build_type, settings.build_dir.display());
        Self::build_command(settings).execute_success().await
    }
}

/// Writes `at2-requirements.toml` into the build directory.
pub async fn write_requirements_file(
    requirements: &RequirementSet,
    settings: &BuildSettings,
) -> Result<PathBuf> {
    let path = settings.requirements_file();
    tokio::fs::create_dir_all(&settings.build_dir)
        .await
        .map_err(|e| RecipeError::fs("create build directory", &settings.build_dir, &e))?;

    let content = render_requirements(requirements);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| RecipeError::fs("write requirements file", &path, &e))?;

    tracing::debug!(target: "build", "Wrote {}", path.display());
    Ok(path)
}

/// TOML form read by the engine's CMake scripts:
///
/// ```toml
/// requires = ["glm/0.9.9.8", "glfw/[>=3.3.2]"]
///
/// [options]
/// glad = ["gl_version=4.5", "gl_profile=core"]
/// ```
#[must_use]
pub fn render_requirements(requirements: &RequirementSet) -> String {
    let mut doc = toml::Table::new();
    doc.insert(
        "requires".to_string(),
        toml::Value::Array(
            requirements.requires().iter().map(|r| toml::Value::String(r.reference())).collect(),
        ),
    );

    let mut options = toml::Table::new();
    for option in requirements.package_options() {
        let entry = options
            .entry(option.package.clone())
            .or_insert_with(|| toml::Value::Array(Vec::new()));
        if let toml::Value::Array(values) = entry {
            values.push(toml::Value::String(format!("{}={}", option.key, option.value)));
        }
    }
    doc.insert("options".to_string(), toml::Value::Table(options));

    doc.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use tempfile::TempDir;

    #[test]
    fn test_build_type_parsing() {
        assert_eq!("RelWithDebInfo".parse::<BuildType>().unwrap(), BuildType::RelWithDebInfo);
        assert!("release".parse::<BuildType>().is_err());
        assert_eq!(BuildType::default(), BuildType::Release);
    }

    #[test]
    fn test_configure_command_switches() {
        let options = OptionSet::from_pairs([("use_sdl", "ON"), ("use_gtest", "False")]).unwrap();
        let mut settings = BuildSettings::new("/src");
        settings.generator = Some("Ninja".to_string());
        settings.build_type = BuildType::Debug;

        let cmd = CMake::configure_command(&options, &settings);
        let args = cmd.get_args();
        assert_eq!(&args[..6], ["-S", "/src", "-B", "/src/build", "-G", "Ninja"]);
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
        assert!(args.contains(&"-DUSE_SDL_INSTEADOF_GLFW=ON".to_string()));
        assert!(args.contains(&"-DUSE_ASSIMP=OFF".to_string()));
        assert!(args.contains(&"-DAT2_BUILD_TESTS=OFF".to_string()));
    }

    #[test]
    fn test_build_command_jobs() {
        let mut settings = BuildSettings::new("/src");
        assert_eq!(CMake::build_command(&settings).get_args(), ["--build", "/src/build", "--config", "Release"]);

        settings.jobs = Some(8);
        let cmd = CMake::build_command(&settings);
        assert_eq!(&cmd.get_args()[4..], ["--parallel", "8"]);
    }

    #[test]
    fn test_render_requirements() {
        let requirements = resolve(&OptionSet::from_pairs([("use_gtest", "ON")]).unwrap());
        let rendered = render_requirements(&requirements);
        let parsed: toml::Table = toml::from_str(&rendered).unwrap();

        let requires: Vec<_> = parsed["requires"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            requires,
            [
                "glm/0.9.9.8",
                "stb/20200203",
                "glad/0.1.34",
                "nlohmann_json/3.9.1",
                "glfw/[>=3.3.2]",
                "gtest/[>=1.10.0]"
            ]
        );

        let glad = parsed["options"]["glad"].as_array().unwrap();
        assert_eq!(glad[0].as_str(), Some("gl_version=4.5"));
        assert_eq!(glad.len(), 3);
    }

    #[tokio::test]
    async fn test_write_requirements_file_creates_build_dir() {
        let temp = TempDir::new().unwrap();
        let settings = BuildSettings::new(temp.path());
        let path = write_requirements_file(&resolve(&OptionSet::new()), &settings).await.unwrap();

        assert_eq!(path, temp.path().join("build").join("at2-requirements.toml"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("glfw/[>=3.3.2]"));
    }
}
