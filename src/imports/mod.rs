//! Copying dependency runtime libraries next to the built executables
//!
//! Shared libraries produced by dependency packages (`.dll` on Windows,
//! `.dylib` on macOS) must sit beside the engine's executables to be found at
//! run time. Each [`ImportRule`] copies the files under `<root>/<src>` whose
//! file name matches `pattern` into `<build_dir>/<dst>`, keeping any
//! sub-directory structure below `src`.
//!
//! A missing source directory is not an error; most packages ship only one of
//! `bin` or `lib`. Symlinks to files are followed and copied as regular files;
//! symlinked directories are not descended into.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{RecipeError, Result};

/// One copy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
    /// Glob matched against file names, e.g. `*.dylib*`
    pub pattern: String,
    /// Directory below the imports root to search
    pub src: String,
    /// Directory below the build directory to copy into
    pub dst: String,
}

impl ImportRule {
    pub fn new(pattern: impl Into<String>, src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// The rules used when the manifest does not list any.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("*.dll", "bin", "bin"), Self::new("*.dylib*", "lib", "bin")]
    }

    /// Compiles the pattern.
    pub fn matcher(&self) -> Result<Pattern> {
        Pattern::new(&self.pattern).map_err(|e| RecipeError::InvalidImportPattern {
            pattern: self.pattern.clone(),
            reason: e.to_string(),
        })
    }
}

/// Applies `rules`, copying from `root` into `build_dir`.
///
/// Returns the destination paths of every copied file, in walk order.
pub fn apply_imports(root: &Path, build_dir: &Path, rules: &[ImportRule]) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for rule in rules {
        let matcher = rule.matcher()?;
        let src_dir = root.join(&rule.src);
        if !src_dir.is_dir() {
            tracing::debug!(target: "imports", "Skipping {}: {} does not exist", rule.pattern, src_dir.display());
            continue;
        }
        let dst_dir = build_dir.join(&rule.dst);

        for entry in WalkDir::new(&src_dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| RecipeError::FileSystemError {
                operation: "scan imports".to_string(),
                path: src_dir.display().to_string(),
                reason: e.to_string(),
            })?;
            // Symlinked libraries (`libfoo.dylib -> libfoo.1.dylib`) are copied as
            // the file they point to.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !matcher.matches(&file_name) {
                continue;
            }

            let relative = entry.path().strip_prefix(&src_dir).unwrap_or(entry.path());
            let target = dst_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RecipeError::fs("create import directory", parent, &e))?;
            }
            std::fs::copy(entry.path(), &target)
                .map_err(|e| RecipeError::fs("copy runtime library", entry.path(), &e))?;

            tracing::debug!(target: "imports", "{} -> {}", entry.path().display(), target.display());
            copied.push(target);
        }
    }

    tracing::info!(target: "imports", "Imported {} runtime libraries", copied.len());
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"lib").unwrap();
    }

    #[test]
    fn test_default_rules_copy_matching_files_only() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("deps");
        let build = temp.path().join("build");

        touch(&root.join("bin/glfw3.dll"));
        touch(&root.join("bin/glfw3.lib"));
        touch(&root.join("lib/libassimp.5.dylib"));
        touch(&root.join("lib/libassimp.a"));
        touch(&root.join("lib/nested/libSDL2-2.0.0.dylib"));

        let copied = apply_imports(&root, &build, &ImportRule::defaults()).unwrap();

        assert_eq!(copied.len(), 3);
        assert!(build.join("bin/glfw3.dll").exists());
        assert!(build.join("bin/libassimp.5.dylib").exists());
        assert!(build.join("bin/nested/libSDL2-2.0.0.dylib").exists());
        assert!(!build.join("bin/glfw3.lib").exists());
        assert!(!build.join("bin/libassimp.a").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_libraries_are_copied() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("deps");
        let build = temp.path().join("build");

        touch(&root.join("lib/libassimp.5.0.1.dylib"));
        std::os::unix::fs::symlink("libassimp.5.0.1.dylib", root.join("lib/libassimp.5.dylib")).unwrap();
        std::os::unix::fs::symlink("libassimp.5.dylib", root.join("lib/libassimp.dylib")).unwrap();
        std::os::unix::fs::symlink("missing.dylib", root.join("lib/libdangling.dylib")).unwrap();

        let copied = apply_imports(&root, &build, &ImportRule::defaults()).unwrap();

        assert_eq!(copied.len(), 3);
        for name in ["libassimp.5.0.1.dylib", "libassimp.5.dylib", "libassimp.dylib"] {
            let target = build.join("bin").join(name);
            assert!(!fs::symlink_metadata(&target).unwrap().file_type().is_symlink(), "{name}");
            assert_eq!(fs::read(&target).unwrap(), b"lib");
        }
        assert!(!build.join("bin/libdangling.dylib").exists());
    }

    #[test]
    fn test_missing_source_dirs_are_skipped() {
        let temp = TempDir::new().unwrap();
        let copied =
            apply_imports(&temp.path().join("nothing"), &temp.path().join("build"), &ImportRule::defaults())
                .unwrap();
        assert!(copied.is_empty());
        assert!(!temp.path().join("build").exists());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let temp = TempDir::new().unwrap();
        let rules = [ImportRule::new("[*.dll", "bin", "bin")];
        let err = apply_imports(temp.path(), temp.path(), &rules).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidImportPattern { .. }));
    }
}
