//! Layered configuration for `keel build`.
//!
//! Priority: flags > `KEEL_*` environment variables > config file > defaults.
//! The resulting [`BuildConfig`] is validated before anything touches the
//! filesystem.

mod loading;
mod tests;

pub use keel_build::{BuildConfig, ConfigResolver, PartialConfig, SourcePatterns};
pub use loading::FileConfigResolver;

/// Config files looked up in the project root, in order.
pub const CONFIG_FILES: [&str; 2] = ["keel.config.json", "keel.config.toml"];

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "KEEL_";

/// Config a new project can start from.
pub fn example_config() -> BuildConfig {
    let mut config = BuildConfig::new(
        vec!["src/**/*.ts".to_string(), "!src/**/*.test.ts".to_string()],
        "index.js",
    );
    config.sourcemap = true;
    config
}
