use clap::{Args, Subcommand};
use keel_build::{PartialConfig, SourcePatterns};
use std::path::PathBuf;

/// Available Keel subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an optimized production build
    ///
    /// Removes the output directory, bundles every entry matched by `src`
    /// and appends the anti-crash monitor to the compiled `main` file.
    Build(BuildArgs),

    /// Show the resolved configuration
    ///
    /// Prints the configuration a build in this directory would use, after
    /// merging config file, environment and flags.
    Config(ConfigArgs),
}

/// Arguments for the build command
///
/// Flags override `KEEL_*` environment variables, which override the config
/// file.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Project root; all config paths are relative to it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of keel.config.json / keel.config.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Entry point pattern; repeat for several, prefix with `!` to exclude
    ///
    /// Examples:
    ///   keel build --src 'src/**/*.ts'
    ///   keel build --src 'src/**/*.ts' --src '!src/**/*.test.ts'
    #[arg(short, long = "src", value_name = "PATTERN", allow_hyphen_values = true)]
    pub src: Vec<String>,

    /// Compiled entry file, relative to the output directory
    #[arg(short, long, value_name = "FILE")]
    pub main: Option<PathBuf>,

    /// Output directory, removed before every build
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Emit source maps
    #[arg(long)]
    pub sourcemap: bool,

    /// Minify output
    #[arg(long)]
    pub minify: bool,

    /// Don't append the anti-crash monitor
    #[arg(long)]
    pub no_anti_crash: bool,

    /// Bundler command line, e.g. "npx esbuild"
    ///
    /// Split on whitespace; quotes are not interpreted, so a program path
    /// containing spaces has to be reached through PATH or a wrapper script.
    #[arg(long, env = "KEEL_ENGINE", default_value = "esbuild", value_name = "COMMAND")]
    pub engine: String,
}

impl BuildArgs {
    /// Overrides carried by the flags that were actually given.
    ///
    /// Boolean flags only ever switch a setting on (or the monitor off); an
    /// absent flag leaves the setting to the lower layers.
    pub fn to_partial(&self) -> PartialConfig {
        PartialConfig {
            src: match self.src.as_slice() {
                [] => None,
                [one] => Some(SourcePatterns::One(one.clone())),
                many => Some(SourcePatterns::Many(many.to_vec())),
            },
            main: self.main.clone(),
            out_dir: self.out_dir.clone(),
            sourcemap: self.sourcemap.then_some(true),
            minify: self.minify.then_some(true),
            anti_crash: self.no_anti_crash.then_some(false),
            cache_dir: None,
        }
    }
}

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Project root to resolve configuration in
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file to use instead of keel.config.json / keel.config.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the JSON schema of the config file instead
    #[arg(long, conflicts_with = "example")]
    pub schema: bool,

    /// Print an example keel.config.json instead
    #[arg(long)]
    pub example: bool,
}
