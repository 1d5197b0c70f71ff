//! Fetch-if-absent for the external source tree
//!
//! The engine needs one dependency that has no package: the header-only `gli`
//! texture library, cloned from source control into a fixed directory.
//! [`acquire`] checks whether that directory exists and clones it only when it
//! does not.
//!
//! Only presence is checked. An existing directory is never inspected for the
//! right branch, commit, or even a complete checkout, so an interrupted clone
//! is silently accepted on the next run.
//!
//! The check and the clone go through [`SourceFetcher`] so tests can count
//! calls without touching the network. [`GitFetcher`] is the real
//! implementation.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{EXTERNAL_DIR, EXTERNAL_NAME, EXTERNAL_URL};
use crate::core::{RecipeError, Result};
use crate::tools::ToolCommand;

/// A directory-backed resource fetched from source control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResource {
    /// Name used in logs
    pub name: String,
    /// Clone URL
    pub url: String,
    /// Target directory; relative paths are taken from the project root
    pub dir: PathBuf,
}

impl ExternalResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dir: dir.into(),
        }
    }

    /// Target directory resolved against `root`.
    #[must_use]
    pub fn target_in(&self, root: &Path) -> PathBuf {
        if self.dir.is_absolute() { self.dir.clone() } else { root.join(&self.dir) }
    }
}

impl Default for ExternalResource {
    /// The gli checkout the engine includes as `<gli/gli.hpp>`.
    fn default() -> Self {
        Self::new(EXTERNAL_NAME, EXTERNAL_URL, EXTERNAL_DIR)
    }
}

/// What [`acquire`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The directory already existed; nothing was fetched.
    AlreadyPresent,
    /// The directory was missing and has been cloned.
    Fetched,
}

/// Presence check and clone for an [`ExternalResource`].
pub trait SourceFetcher {
    /// Whether `dir` already exists.
    fn is_present(&self, dir: &Path) -> bool;

    /// Clones `url` into `dir`.
    fn fetch(&self, url: &str, dir: &Path) -> impl Future<Output = Result<()>>;
}

/// Clones with `git clone`.
#[derive(Debug, Clone, Default)]
pub struct GitFetcher {
    timeout: Option<Duration>,
}

impl GitFetcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
        }
    }

    /// Gives up on a clone that takes longer than `timeout`. Off by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SourceFetcher for GitFetcher {
    fn is_present(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    async fn fetch(&self, url: &str, dir: &Path) -> Result<()> {
        ToolCommand::git_clone(url, dir)
            .with_timeout(self.timeout)
            .with_context("acquire")
            .execute_success()
            .await
    }
}

/// Ensures `resource` exists under `root`, cloning it if it does not.
///
/// `cancel` races the clone; if it completes first the clone is dropped
/// (killing the child process) and [`RecipeError::Cancelled`] is returned.
/// Pass [`std::future::pending`] for no cancellation.
pub async fn acquire<F, C>(
    resource: &ExternalResource,
    root: &Path,
    fetcher: &F,
    cancel: C,
) -> Result<AcquireOutcome>
where
    F: SourceFetcher,
    C: Future<Output = ()>,
{
    let target = resource.target_in(root);

    if fetcher.is_present(&target) {
        tracing::info!(
            target: "acquire",
            "{} already present at {}, skipping clone",
            resource.name,
            target.display()
        );
        return Ok(AcquireOutcome::AlreadyPresent);
    }

    tracing::info!(target: "acquire", "Cloning {} from {}", resource.name, resource.url);

    tokio::select! {
        result = fetcher.fetch(&resource.url, &target) => {
            result?;
        }
        () = cancel => {
            tracing::warn!(target: "acquire", "Clone of {} cancelled", resource.name);
            return Err(RecipeError::Cancelled {
                operation: format!("clone of {}", resource.name),
            });
        }
    }

    tracing::info!(target: "acquire", "Fetched {} into {}", resource.name, target.display());
    Ok(AcquireOutcome::Fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingFetcher, init_test_logging};
    use tempfile::TempDir;

    #[test]
    fn test_default_resource() {
        let resource = ExternalResource::default();
        assert_eq!(resource.name, "gli");
        assert_eq!(resource.url, "https://github.com/g-truc/gli.git");
        assert_eq!(resource.target_in(Path::new("/project")), Path::new("/project/gli"));
    }

    #[test]
    fn test_absolute_dir_is_kept() {
        let abs = std::env::temp_dir().join("gli-abs");
        let resource = ExternalResource::new("gli", "url", &abs);
        assert_eq!(resource.target_in(Path::new("/project")), abs);
    }

    #[tokio::test]
    async fn test_missing_dir_is_fetched_once() {
        init_test_logging(None);
        let fetcher = RecordingFetcher::absent();
        let outcome = acquire(
            &ExternalResource::default(),
            Path::new("/project"),
            &fetcher,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, AcquireOutcome::Fetched);
        assert_eq!(fetcher.fetch_calls(), vec![(
            "https://github.com/g-truc/gli.git".to_string(),
            PathBuf::from("/project/gli")
        )]);
    }

    #[tokio::test]
    async fn test_present_dir_is_never_fetched() {
        let fetcher = RecordingFetcher::present();
        for _ in 0..2 {
            let outcome = acquire(
                &ExternalResource::default(),
                Path::new("/project"),
                &fetcher,
                std::future::pending(),
            )
            .await
            .unwrap();
            assert_eq!(outcome, AcquireOutcome::AlreadyPresent);
        }
        assert_eq!(fetcher.presence_checks(), 2);
        assert!(fetcher.fetch_calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        init_test_logging(None);
        let fetcher = RecordingFetcher::failing("Could not resolve host: github.com");
        let err = acquire(
            &ExternalResource::default(),
            Path::new("/project"),
            &fetcher,
            std::future::pending(),
        )
        .await
        .unwrap_err();

        match err {
            RecipeError::CloneFailed { url, reason } => {
                assert_eq!(url, "https://github.com/g-truc/gli.git");
                assert!(reason.contains("Could not resolve host"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancellation() {
        init_test_logging(None);
        let fetcher = RecordingFetcher::hanging();
        let err = acquire(
            &ExternalResource::default(),
            Path::new("/project"),
            &fetcher,
            std::future::ready(()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RecipeError::Cancelled { .. }));
    }

    #[test]
    fn test_git_fetcher_presence_is_directory_check() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher::new();
        assert!(fetcher.is_present(temp.path()));
        assert!(!fetcher.is_present(&temp.path().join("gli")));

        std::fs::write(temp.path().join("file"), "").unwrap();
        assert!(!fetcher.is_present(&temp.path().join("file")));
    }

    #[tokio::test]
    async fn test_git_fetcher_clones_local_repository() {
        init_test_logging(None);
        if !crate::tools::Tool::Git.is_installed() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let upstream = crate::test_utils::init_git_repo(&temp.path().join("upstream")).unwrap();
        let project = temp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();

        let resource = ExternalResource::new("gli", upstream.display().to_string(), "gli");
        let fetcher = GitFetcher::new().with_timeout(Some(Duration::from_secs(60)));

        let first = acquire(&resource, &project, &fetcher, std::future::pending()).await.unwrap();
        assert_eq!(first, AcquireOutcome::Fetched);
        assert!(project.join("gli").join("README.md").exists());

        let second = acquire(&resource, &project, &fetcher, std::future::pending()).await.unwrap();
        assert_eq!(second, AcquireOutcome::AlreadyPresent);
    }
}
