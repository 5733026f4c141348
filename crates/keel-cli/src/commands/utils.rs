//! Shared helpers for command implementations.

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Current working directory of the process.
pub fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Resolve `path` against `cwd` unless it's already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Project root from `--cwd`, or the current directory.
///
/// The directory has to exist; everything the build deletes or writes is
/// resolved relative to it.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = get_cwd()?;
    let root = match cwd {
        Some(dir) => resolve_path(dir, &current),
        None => return Ok(current),
    };

    if !root.exists() {
        return Err(CliError::FileNotFound(root));
    }
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/project");
        assert_eq!(resolve_path(Path::new("dist"), cwd), PathBuf::from("/project/dist"));
        assert_eq!(resolve_path(Path::new("/abs/dist"), cwd), PathBuf::from("/abs/dist"));
    }

    #[test]
    fn test_project_root_defaults_to_cwd() {
        assert_eq!(project_root(None).unwrap(), get_cwd().unwrap());
    }

    #[test]
    fn test_project_root_explicit() {
        let dir = TempDir::new().unwrap();
        assert_eq!(project_root(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn test_project_root_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            project_root(Some(&missing)),
            Err(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_project_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("package.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(matches!(
            project_root(Some(&file)),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
