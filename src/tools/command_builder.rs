//! Builder for running external tools with consistent error handling
//!
//! Every external process the recipe starts (`git clone`, `cmake`,
//! `cmake --build`) goes through [`ToolCommand`]. The builder owns:
//! - locating the executable on `PATH`
//! - optional timeouts (off unless asked for)
//! - mapping a non-zero exit into the matching [`RecipeError`] variant
//!
//! Child processes are started with `kill_on_drop`. Dropping the future
//! returned by [`ToolCommand::execute`] (a timeout, or a caller racing it in
//! `select!`) kills the child, so a cancelled clone does not leave a stray
//! `git` running.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use super::Tool;
use crate::constants::SLOW_COMMAND_THRESHOLD;
use crate::core::{RecipeError, Result};

/// Type-safe builder for one external tool invocation.
///
/// ```rust,no_run
/// use at2_recipe::tools::ToolCommand;
/// use std::time::Duration;
///
/// # async fn example() -> at2_recipe::core::Result<()> {
/// ToolCommand::git_clone("https://github.com/g-truc/gli.git", "gli")
///     .with_timeout(Some(Duration::from_secs(600)))
///     .with_context("Fetching gli")
///     .execute_success()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    tool: Tool,

    /// Arguments after the executable name
    args: Vec<String>,

    /// Capture stdout/stderr (true) or inherit the terminal (false)
    capture_output: bool,

    env_vars: Vec<(String, String)>,

    /// `None` waits forever
    timeout_duration: Option<Duration>,

    /// Prefix for log lines
    context: Option<String>,

    /// Kept for clone error messages
    clone_url: Option<String>,
}

impl ToolCommand {
    /// Creates an empty command for `tool`.
    #[must_use]
    pub const fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
            capture_output: true,
            env_vars: Vec::new(),
            timeout_duration: None,
            context: None,
            clone_url: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Lets the child write straight to the terminal.
    ///
    /// Used for long builds where the user wants to see compiler output as it
    /// happens. Errors then carry only the exit status.
    #[must_use]
    pub const fn inherit_stdio(mut self) -> Self {
        self.capture_output = false;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The tool this command runs.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Arguments after the executable name.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout_duration
    }

    /// Runs the command and waits for it to exit.
    ///
    /// The child is killed when the command times out or the returned future
    /// is dropped.
    pub async fn execute(self) -> Result<ToolOutput> {
        let start = Instant::now();
        let executable = self.tool.locate()?;
        let rendered = self.rendered();

        let mut cmd = Command::new(&executable);
        cmd.args(&self.args).kill_on_drop(true);
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "tools", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }
        if self.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        match self.context {
            Some(ref ctx) => tracing::debug!(target: "tools", "({}) Executing command: {}", ctx, rendered),
            None => tracing::debug!(target: "tools", "Executing command: {}", rendered),
        }

        let output = match self.timeout_duration {
            Some(duration) => match tokio::time::timeout(duration, cmd.output()).await {
                Ok(result) => result.map(Some),
                Err(_) => Ok(None),
            },
            None => cmd.output().await.map(Some),
        };

        let output = match output {
            Ok(Some(output)) => output,
            Ok(None) => {
                let seconds = self.timeout_duration.map_or(0, |d| d.as_secs());
                tracing::warn!(
                    target: "tools",
                    "Command timed out after {} seconds: {}",
                    seconds,
                    rendered
                );
                return Err(RecipeError::CommandTimedOut {
                    tool: self.tool.name().to_string(),
                    operation: self.operation(),
                    seconds,
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RecipeError::ToolNotFound {
                    tool: self.tool.name().to_string(),
                });
            }
            Err(e) => return Err(RecipeError::IoError(e)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(target: "tools", "Command failed with exit code: {:?}", output.status.code());
            if !stderr.is_empty() {
                tracing::debug!(target: "tools", "Error: {}", stderr.trim());
            }

            let reason = if !stderr.trim().is_empty() {
                stderr.trim().to_string()
            } else if !stdout.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                format!("{} exited with {}", self.tool.name(), output.status)
            };
            return Err(self.failure(reason));
        }

        if !stdout.is_empty() {
            tracing::debug!(target: "tools", "{}", stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "tools", "{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed > SLOW_COMMAND_THRESHOLD {
            tracing::info!(
                target: "tools::perf",
                "{} {} took {:.2}s",
                self.tool.name(),
                self.operation(),
                elapsed.as_secs_f64()
            );
        }

        Ok(ToolOutput {
            stdout,
            stderr,
        })
    }

    /// Runs the command and discards its output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }

    /// First argument, e.g. `clone` or `--build`.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    fn rendered(&self) -> String {
        if self.args.is_empty() {
            self.tool.name().to_string()
        } else {
            format!("{} {}", self.tool.name(), self.args.join(" "))
        }
    }

    /// Maps a non-zero exit to the error for this kind of invocation.
    fn failure(&self, reason: String) -> RecipeError {
        match self.tool {
            Tool::Git if self.args.first().is_some_and(|a| a == "clone") => {
                RecipeError::CloneFailed {
                    url: self.clone_url.clone().unwrap_or_else(|| "unknown".to_string()),
                    reason,
                }
            }
            Tool::CMake if self.args.first().is_some_and(|a| a == "--build") => {
                RecipeError::BuildFailed {
                    reason,
                }
            }
            Tool::CMake => RecipeError::ConfigureFailed {
                reason,
            },
            Tool::Git => RecipeError::CommandFailed {
                command: self.rendered(),
                reason,
            },
        }
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

// Convenience builders for the invocations the recipe needs

impl ToolCommand {
    /// `git clone <url> <target>`, failing instead of prompting for credentials
    pub fn git_clone(url: &str, target: impl AsRef<Path>) -> Self {
        let mut cmd = Self::new(Tool::Git)
            .args(["clone".to_string(), url.to_string(), target.as_ref().display().to_string()])
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd.clone_url = Some(url.to_string());
        cmd
    }

    /// `cmake -S <source> -B <build>`; callers append cache variables.
    pub fn cmake_configure(source_dir: impl AsRef<Path>, build_dir: impl AsRef<Path>) -> Self {
        Self::new(Tool::CMake).args([
            "-S".to_string(),
            source_dir.as_ref().display().to_string(),
            "-B".to_string(),
            build_dir.as_ref().display().to_string(),
        ])
    }

    /// `cmake --build <build> --config <config>`
    pub fn cmake_build(build_dir: impl AsRef<Path>, config: &str) -> Self {
        Self::new(Tool::CMake).args([
            "--build".to_string(),
            build_dir.as_ref().display().to_string(),
            "--config".to_string(),
            config.to_string(),
        ])
    }
}
