//! Entry point selection for the bundling engine.
//!
//! An [`EntrySet`] is the configured source patterns plus exclusions for the
//! tool's own working directories, so a build never picks up its previous
//! output or cache as input.

use crate::config::BuildConfig;
use crate::engine::EngineError;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};

/// Conventional build directory, always excluded from the entry set.
pub const BUILD_DIR: &str = "dist";

/// Installed packages are resolved at runtime and are never entry points.
const PACKAGES_DIR: &str = "node_modules";

/// Glob patterns selecting entry point files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySet {
    patterns: Vec<String>,
}

impl EntrySet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| normalize_pattern(p.as_ref()))
                .collect(),
        }
    }

    /// Entry set for a production build: the configured patterns with the
    /// build directory, cache directory and output directory excluded.
    pub fn for_build(config: &BuildConfig) -> Self {
        Self::new(config.src.as_slice())
            .exclude_dir(Path::new(BUILD_DIR))
            .exclude_dir(&config.cache_dir)
            .exclude_dir(&config.out_dir)
    }

    /// Exclude a directory (relative to the project root) from the set.
    ///
    /// The exclusion is anchored at the root, so `src/dist/` is still a
    /// source directory. Directories outside the project root can't contain
    /// entries and are skipped.
    pub fn exclude_dir(mut self, dir: &Path) -> Self {
        if dir.is_absolute() {
            return self;
        }

        let dir = dir_pattern(dir);
        if dir.is_empty() || dir.starts_with("..") {
            return self;
        }

        let pattern = format!("!/{dir}");
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Expand the patterns to concrete files under `root`, sorted by path.
    ///
    /// Patterns follow gitignore glob rules; `.gitignore` files themselves
    /// are not consulted.
    pub fn resolve(&self, root: &Path) -> Result<Vec<PathBuf>, EngineError> {
        let mut builder = OverrideBuilder::new(root);
        for pattern in &self.patterns {
            builder
                .add(pattern)
                .map_err(|source| EngineError::invalid_pattern(pattern, source))?;
        }
        let overrides = builder
            .build()
            .map_err(|source| EngineError::invalid_pattern(self.patterns.join(", "), source))?;

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .overrides(overrides)
            .filter_entry(|entry| entry.file_name() != PACKAGES_DIR)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(EngineError::walk)?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::NoEntries {
                patterns: self.patterns.clone(),
            });
        }

        Ok(files)
    }
}

fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim();
    match pattern.strip_prefix('!') {
        Some(rest) => format!("!{}", rest.trim_start_matches("./")),
        None => pattern.trim_start_matches("./").to_string(),
    }
}

fn dir_pattern(dir: &Path) -> String {
    let dir = dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_start_matches("./").trim_end_matches('/');
    if dir == "." {
        String::new()
    } else {
        dir.to_string()
    }
}
