//! Removal of the previous build output.

use crate::error::BuildError;
use path_clean::PathClean;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Removes an output directory before a fresh build.
///
/// Removal is recursive and idempotent: a missing directory is not an error.
/// Directories that contain the project root are refused.
#[derive(Debug, Clone)]
pub struct OutputCleaner {
    project_root: PathBuf,
}

impl OutputCleaner {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Resolve `out_dir` against the project root.
    pub fn resolve(&self, out_dir: &Path) -> PathBuf {
        absolute(&self.project_root.join(out_dir))
    }

    /// Remove `out_dir` and everything in it, returning the resolved path.
    pub async fn clean(&self, out_dir: &Path) -> Result<PathBuf, BuildError> {
        let target = self.resolve(out_dir);

        if absolute(&self.project_root).starts_with(&target) {
            return Err(BuildError::UnsafeOutputDir(target));
        }

        match remove_dir_if_exists(&target).await {
            Ok(true) => debug!(path = %target.display(), "removed previous build output"),
            Ok(false) => debug!(path = %target.display(), "no previous build output"),
            Err(source) => {
                return Err(BuildError::Clean {
                    path: target,
                    source,
                });
            }
        }

        Ok(target)
    }
}

/// Remove a directory tree, treating a missing path as already removed.
///
/// Returns whether anything was removed.
pub(crate) async fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .clean()
}
