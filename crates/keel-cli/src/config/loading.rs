use super::{CONFIG_FILES, ENV_PREFIX};
use figment::{
    Figment,
    error::Kind,
    providers::{Env, Format, Json, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use keel_build::{BuildConfig, ConfigError, ConfigResolver, PartialConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves a [`BuildConfig`] from the config file in a project root, the
/// environment, and caller overrides.
#[derive(Debug, Clone)]
pub struct FileConfigResolver {
    root: PathBuf,
    config_path: Option<PathBuf>,
}

impl FileConfigResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: None,
        }
    }

    /// Use `path` instead of looking for [`CONFIG_FILES`]. Relative paths are
    /// taken from the project root; the file must exist.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The config file that will be read, if any.
    pub fn config_file(&self) -> Result<Option<PathBuf>, ConfigError> {
        match &self.config_path {
            Some(path) => {
                let path = self.root.join(path);
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path))
                }
            }
            None => Ok(CONFIG_FILES
                .iter()
                .map(|name| self.root.join(name))
                .find(|path| path.is_file())),
        }
    }

    /// All configuration sources, lowest priority first.
    pub fn figment(&self, overrides: &PartialConfig) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new();

        if let Some(path) = self.config_file()? {
            debug!(path = %path.display(), "loading config file");
            figment = if path.extension().is_some_and(|ext| ext == "toml") {
                figment.merge(Toml::file(path))
            } else {
                figment.merge(Json::file(path))
            };
        }

        figment = figment.merge(env_provider());

        if !overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }
}

impl ConfigResolver for FileConfigResolver {
    fn resolve(&self, overrides: &PartialConfig) -> Result<BuildConfig, ConfigError> {
        let config: BuildConfig = self
            .figment(overrides)?
            .extract()
            .map_err(from_figment_error)?;
        config.validate()?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

/// `KEEL_SRC`, `KEEL_OUT_DIR`, ... mapped onto the camelCase config keys.
/// Other `KEEL_*` variables (such as `KEEL_ENGINE`) are ignored.
///
/// `lowercase(false)` has to come last: chaining another key mapping turns
/// lowercasing back on.
pub(crate) fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter_map(|key| env_key(key).map(Uncased::from))
        .lowercase(false)
}

fn env_key(key: &UncasedStr) -> Option<&'static str> {
    let key = key.as_str().to_ascii_lowercase();
    let mapped = match key.as_str() {
        "src" => "src",
        "main" => "main",
        "out_dir" => "outDir",
        "sourcemap" => "sourcemap",
        "minify" => "minify",
        "anti_crash" => "antiCrash",
        "cache_dir" => "cacheDir",
        _ => return None,
    };
    Some(mapped)
}

fn from_figment_error(err: figment::Error) -> ConfigError {
    match &err.kind {
        Kind::MissingField(field) => {
            let field = field.to_string();
            let hint = format!(
                "Add \"{field}\" to keel.config.json or pass it on the command line"
            );
            ConfigError::missing_field(field, hint)
        }
        _ => {
            let field = if err.path.is_empty() {
                "configuration".to_string()
            } else {
                err.path.join(".")
            };
            ConfigError::invalid_value(
                field,
                err.kind.to_string(),
                "Check keel.config.json syntax and field types",
            )
        }
    }
}
