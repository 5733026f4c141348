//! `keel config`.

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::config::{BuildConfig, ConfigResolver, FileConfigResolver, PartialConfig, example_config};
use crate::error::Result;

/// Print the requested document to stdout.
pub async fn execute(args: ConfigArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

/// JSON for the resolved config, the config schema, or the example config.
pub fn render(args: &ConfigArgs) -> Result<String> {
    let json = if args.schema {
        serde_json::to_string_pretty(&schemars::schema_for!(BuildConfig))?
    } else if args.example {
        serde_json::to_string_pretty(&example_config())?
    } else {
        let root = utils::project_root(args.cwd.as_deref())?;
        let config = FileConfigResolver::new(root)
            .with_config_file(args.config.clone())
            .resolve(&PartialConfig::default())?;
        serde_json::to_string_pretty(&config)?
    };
    Ok(json)
}
