//! One resolution run, end to end
//!
//! A [`ResolutionRun`] moves through
//!
//! ```text
//! Unresolved ──resolve()──▶ Resolving ──▶ Resolved ──deliver()──▶ Delivered
//!                               │                         │
//!                               └────────▶ Failed ◀───────┘
//! ```
//!
//! `resolve()` computes the requirements and then performs the acquisition
//! step, strictly in that order. `deliver()` hands the result to the build
//! system (`configure`, then `build`, then runtime-library imports). Any failure
//! moves the run to [`RunState::Failed`]; requirements already declared stay
//! readable for diagnostics but nothing further is attempted. `Delivered` and
//! `Failed` are terminal: a run configures and builds at most once.
//!
//! Steps run one after another on the caller's task. Nothing here spawns.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use crate::acquire::{AcquireOutcome, SourceFetcher, acquire};
use crate::build::BuildSystem;
use crate::config::RecipeConfig;
use crate::core::{RecipeError, Result};
use crate::imports::apply_imports;
use crate::requirements::RequirementSet;
use crate::resolver::resolve;

/// Lifecycle of a [`ResolutionRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Unresolved,
    Resolving,
    Resolved,
    /// Configured, built and imports applied
    Delivered,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unresolved => "unresolved",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub requirements: RequirementSet,
    pub acquisition: AcquireOutcome,
    /// Destination paths of imported runtime libraries
    pub imported: Vec<PathBuf>,
}

/// Drives resolution, acquisition and delegation for one configuration.
pub struct ResolutionRun<'a, F, B> {
    config: &'a RecipeConfig,
    fetcher: F,
    build_system: B,
    state: RunState,
    requirements: Option<RequirementSet>,
    acquisition: Option<AcquireOutcome>,
}

impl<'a, F, B> ResolutionRun<'a, F, B>
where
    F: SourceFetcher,
    B: BuildSystem,
{
    pub const fn new(config: &'a RecipeConfig, fetcher: F, build_system: B) -> Self {
        Self {
            config,
            fetcher,
            build_system,
            state: RunState::Unresolved,
            requirements: None,
            acquisition: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Requirements declared so far, including after a failure.
    #[must_use]
    pub const fn requirements(&self) -> Option<&RequirementSet> {
        self.requirements.as_ref()
    }

    /// What the acquisition step did, once it has run.
    #[must_use]
    pub const fn acquisition(&self) -> Option<AcquireOutcome> {
        self.acquisition
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub const fn build_system(&self) -> &B {
        &self.build_system
    }

    /// Resolves requirements, then ensures the external source tree exists.
    ///
    /// `cancel` can abort the clone; see [`acquire`].
    pub async fn resolve<C>(&mut self, cancel: C) -> Result<&RequirementSet>
    where
        C: Future<Output = ()>,
    {
        self.expect_state(RunState::Unresolved)?;
        self.state = RunState::Resolving;
        let config = self.config;

        self.requirements = Some(resolve(&config.options));

        let outcome = acquire(&config.external, &config.root, &self.fetcher, cancel).await;
        match outcome {
            Ok(outcome) => {
                self.acquisition = Some(outcome);
                self.state = RunState::Resolved;
            }
            Err(e) => return Err(self.fail(e)),
        }

        self.requirements.as_ref().ok_or_else(|| RecipeError::InvalidRunState {
            expected: RunState::Resolved.to_string(),
            actual: self.state.to_string(),
        })
    }

    /// Hands the resolved requirements to the build system.
    ///
    /// Returns the destination paths of imported runtime libraries.
    pub async fn deliver(&mut self) -> Result<Vec<PathBuf>> {
        self.expect_state(RunState::Resolved)?;
        let config = self.config;
        let settings = &config.build;

        let configured = match self.requirements.as_ref() {
            Some(requirements) => {
                self.build_system.configure(requirements, &config.options, settings).await
            }
            None => Err(RecipeError::InvalidRunState {
                expected: RunState::Resolved.to_string(),
                actual: "resolved without requirements".to_string(),
            }),
        };
        if let Err(e) = configured {
            return Err(self.fail(e));
        }

        let built = self.build_system.build(settings).await;
        if let Err(e) = built {
            return Err(self.fail(e));
        }

        let imported = match config.imports_root {
            Some(ref imports_root) => {
                match apply_imports(imports_root, &settings.build_dir, &config.imports) {
                    Ok(imported) => imported,
                    Err(e) => return Err(self.fail(e)),
                }
            }
            None => {
                tracing::debug!(target: "pipeline", "No imports root configured, skipping imports");
                Vec::new()
            }
        };

        self.state = RunState::Delivered;
        Ok(imported)
    }

    /// `resolve()` followed by `deliver()`.
    pub async fn execute<C>(&mut self, cancel: C) -> Result<RunReport>
    where
        C: Future<Output = ()>,
    {
        self.resolve(cancel).await?;
        let imported = self.deliver().await?;

        Ok(RunReport {
            requirements: self.requirements.clone().unwrap_or_default(),
            acquisition: self.acquisition.unwrap_or(AcquireOutcome::AlreadyPresent),
            imported,
        })
    }

    fn expect_state(&self, expected: RunState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RecipeError::InvalidRunState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            })
        }
    }

    fn fail(&mut self, error: RecipeError) -> RecipeError {
        tracing::debug!(target: "pipeline", "Run failed while {}: {}", self.state, error);
        self.state = RunState::Failed;
        error
    }
}
