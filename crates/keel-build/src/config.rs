//! Build configuration record and the resolver seam.
//!
//! [`BuildConfig`] is the fully resolved record the pipeline consumes. Callers
//! that layer several sources (files, environment, flags) implement
//! [`ConfigResolver`] and hand overrides in as a [`PartialConfig`].

use crate::error::ConfigError;
use path_clean::PathClean;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Default cache directory used by the tool itself.
pub const DEFAULT_CACHE_DIR: &str = ".keel";

pub fn default_out_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR)
}

pub fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

pub fn default_anti_crash() -> bool {
    true
}

/// Entry point glob patterns.
///
/// Accepts a single pattern or a list. Patterns starting with `!` exclude
/// matching paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SourcePatterns {
    One(String),
    Many(Vec<String>),
}

impl SourcePatterns {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        }
    }

    /// Whether at least one pattern selects files (rather than excluding them).
    pub fn has_positive(&self) -> bool {
        self.as_slice().iter().any(|p| !p.starts_with('!'))
    }
}

impl From<&str> for SourcePatterns {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_string())
    }
}

impl From<Vec<String>> for SourcePatterns {
    fn from(patterns: Vec<String>) -> Self {
        Self::Many(patterns)
    }
}

/// Resolved build configuration - loaded from keel.config.json or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    /// Entry point patterns (e.g. "src/**/*.ts"); prefix with `!` to exclude
    pub src: SourcePatterns,

    /// Compiled entry file, relative to `outDir` (e.g. "index.js")
    pub main: PathBuf,

    /// Output directory, removed before every build
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Emit source maps
    #[serde(default)]
    pub sourcemap: bool,

    /// Minify output (identifier names are always kept)
    #[serde(default)]
    pub minify: bool,

    /// Append the anti-crash monitor to the compiled entry file
    #[serde(default = "default_anti_crash")]
    pub anti_crash: bool,

    /// Cache directory used by the tool, never treated as source
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl BuildConfig {
    /// Create a config with default values for everything but the entry set.
    pub fn new(src: impl Into<SourcePatterns>, main: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            main: main.into(),
            out_dir: default_out_dir(),
            sourcemap: false,
            minify: false,
            anti_crash: default_anti_crash(),
            cache_dir: default_cache_dir(),
        }
    }

    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let patterns = self.src.as_slice();
        if patterns.is_empty() || !self.src.has_positive() {
            return Err(ConfigError::missing_field(
                "src",
                "Provide at least one entry pattern, e.g. \"src/**/*.ts\"",
            ));
        }
        if let Some(empty) = patterns.iter().find(|p| p.trim_start_matches('!').trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "src",
                format!("{empty:?}"),
                "Entry patterns cannot be empty",
            ));
        }

        if self.main.as_os_str().is_empty() {
            return Err(ConfigError::missing_field(
                "main",
                "Name the compiled entry file relative to outDir, e.g. \"index.js\"",
            ));
        }
        if self.main.is_absolute()
            || self
                .main
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(ConfigError::invalid_value(
                "main",
                self.main.display().to_string(),
                "main must be a relative path inside outDir",
            ));
        }

        validate_dir("outDir", &self.out_dir)?;
        validate_dir("cacheDir", &self.cache_dir)?;

        Ok(())
    }
}

/// Reject directories that would resolve to the project root or the
/// filesystem root.
fn validate_dir(field: &str, dir: &Path) -> Result<(), ConfigError> {
    let cleaned = dir.clean();
    let is_root = cleaned.as_os_str().is_empty()
        || cleaned == Path::new(".")
        || (cleaned.has_root() && cleaned.parent().is_none());

    if is_root {
        return Err(ConfigError::invalid_value(
            field,
            dir.display().to_string(),
            format!("{field} must be a dedicated directory, not the project or filesystem root"),
        ));
    }
    Ok(())
}

/// Caller-supplied overrides. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<SourcePatterns>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_crash: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl PartialConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the set fields onto `config`.
    pub fn apply_to(&self, mut config: BuildConfig) -> BuildConfig {
        if let Some(src) = &self.src {
            config.src = src.clone();
        }
        if let Some(main) = &self.main {
            config.main = main.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(sourcemap) = self.sourcemap {
            config.sourcemap = sourcemap;
        }
        if let Some(minify) = self.minify {
            config.minify = minify;
        }
        if let Some(anti_crash) = self.anti_crash {
            config.anti_crash = anti_crash;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }
        config
    }
}

/// Produces a validated [`BuildConfig`] from caller overrides.
pub trait ConfigResolver {
    fn resolve(&self, overrides: &PartialConfig) -> Result<BuildConfig, ConfigError>;
}

/// A fixed config resolves to itself with the overrides applied.
impl ConfigResolver for BuildConfig {
    fn resolve(&self, overrides: &PartialConfig) -> Result<BuildConfig, ConfigError> {
        let config = overrides.apply_to(self.clone());
        config.validate()?;
        Ok(config)
    }
}
