//! Recording stand-ins for the external collaborators
//!
//! [`RecordingFetcher`] and [`RecordingBuildSystem`] implement the same traits
//! as the real git and CMake drivers but only record what they were asked to
//! do, so tests can assert on call counts and ordering.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::acquire::SourceFetcher;
use crate::build::{BuildSettings, BuildSystem};
use crate::core::{RecipeError, Result};
use crate::options::OptionSet;
use crate::requirements::RequirementSet;

#[derive(Debug, Clone)]
enum FetchBehavior {
    Succeed,
    Fail(String),
    Hang,
}

/// A [`SourceFetcher`] with a fixed presence answer.
#[derive(Debug)]
pub struct RecordingFetcher {
    present: bool,
    behavior: FetchBehavior,
    presence_checks: AtomicUsize,
    fetches: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingFetcher {
    fn with(present: bool, behavior: FetchBehavior) -> Self {
        Self {
            present,
            behavior,
            presence_checks: AtomicUsize::new(0),
            fetches: Mutex::new(Vec::new()),
        }
    }

    /// Directory missing; fetch succeeds.
    #[must_use]
    pub fn absent() -> Self {
        Self::with(false, FetchBehavior::Succeed)
    }

    /// Directory already there.
    #[must_use]
    pub fn present() -> Self {
        Self::with(true, FetchBehavior::Succeed)
    }

    /// Directory missing; fetch fails with `reason` as a clone error.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self::with(false, FetchBehavior::Fail(reason.to_string()))
    }

    /// Directory missing; fetch never completes.
    #[must_use]
    pub fn hanging() -> Self {
        Self::with(false, FetchBehavior::Hang)
    }

    /// How many times presence was checked.
    pub fn presence_checks(&self) -> usize {
        self.presence_checks.load(Ordering::SeqCst)
    }

    /// Every `(url, dir)` passed to `fetch`.
    pub fn fetch_calls(&self) -> Vec<(String, PathBuf)> {
        self.fetches.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl SourceFetcher for RecordingFetcher {
    fn is_present(&self, _dir: &Path) -> bool {
        self.presence_checks.fetch_add(1, Ordering::SeqCst);
        self.present
    }

    async fn fetch(&self, url: &str, dir: &Path) -> Result<()> {
        if let Ok(mut calls) = self.fetches.lock() {
            calls.push((url.to_string(), dir.to_path_buf()));
        }
        match &self.behavior {
            FetchBehavior::Succeed => Ok(()),
            FetchBehavior::Fail(reason) => Err(RecipeError::CloneFailed {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            FetchBehavior::Hang => std::future::pending().await,
        }
    }
}

/// One call received by [`RecordingBuildSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCall {
    /// `configure` with this many requirements
    Configure(usize),
    Build,
}

/// A [`BuildSystem`] that records calls and optionally fails one step.
#[derive(Debug, Default)]
pub struct RecordingBuildSystem {
    configure_error: Option<String>,
    build_error: Option<String>,
    calls: Mutex<Vec<BuildCall>>,
}

impl RecordingBuildSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `configure` fails with `reason`.
    #[must_use]
    pub fn failing_configure(reason: &str) -> Self {
        Self {
            configure_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// `build` fails with `reason`.
    #[must_use]
    pub fn failing_build(reason: &str) -> Self {
        Self {
            build_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<BuildCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: BuildCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl BuildSystem for RecordingBuildSystem {
    async fn configure(
        &self,
        requirements: &RequirementSet,
        _options: &OptionSet,
        _settings: &BuildSettings,
    ) -> Result<()> {
        self.record(BuildCall::Configure(requirements.len()));
        match &self.configure_error {
            Some(reason) => Err(RecipeError::ConfigureFailed {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn build(&self, _settings: &BuildSettings) -> Result<()> {
        self.record(BuildCall::Build);
        match &self.build_error {
            Some(reason) => Err(RecipeError::BuildFailed {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
