#[cfg(test)]
mod tests {
    use crate::config::*;
    use keel_build::ConfigError;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 8] = [
        "KEEL_SRC",
        "KEEL_MAIN",
        "KEEL_OUT_DIR",
        "KEEL_SOURCEMAP",
        "KEEL_MINIFY",
        "KEEL_ANTI_CRASH",
        "KEEL_CACHE_DIR",
        "KEEL_ENGINE",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn project(config_json: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keel.config.json"), config_json).unwrap();
        dir
    }

    #[test]
    #[serial]
    fn test_file_with_defaults() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts", "main": "index.js" }"#);

        let config = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap();

        assert_eq!(config.src, SourcePatterns::One("src/**/*.ts".into()));
        assert_eq!(config.main, PathBuf::from("index.js"));
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.cache_dir, PathBuf::from(".keel"));
        assert!(config.anti_crash);
        assert!(!config.sourcemap);
        assert!(!config.minify);
    }

    #[test]
    #[serial]
    fn test_toml_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("keel.config.toml"),
            "src = [\"src/**/*.ts\", \"!src/**/*.spec.ts\"]\nmain = \"server.js\"\noutDir = \"build\"\n",
        )
        .unwrap();

        let config = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap();

        assert_eq!(config.src.as_slice().len(), 2);
        assert_eq!(config.out_dir, PathBuf::from("build"));
    }

    #[test]
    #[serial]
    fn test_json_preferred_over_toml() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts", "main": "from-json.js" }"#);
        fs::write(
            dir.path().join("keel.config.toml"),
            "src = \"src/**/*.ts\"\nmain = \"from-toml.js\"\n",
        )
        .unwrap();

        let resolver = FileConfigResolver::new(dir.path());
        assert_eq!(
            resolver.config_file().unwrap(),
            Some(dir.path().join("keel.config.json"))
        );
        let config = resolver.resolve(&PartialConfig::default()).unwrap();
        assert_eq!(config.main, PathBuf::from("from-json.js"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts", "main": "index.js", "outDir": "dist" }"#);
        unsafe {
            std::env::set_var("KEEL_OUT_DIR", "out");
            std::env::set_var("KEEL_MINIFY", "true");
            std::env::set_var("KEEL_ANTI_CRASH", "false");
            std::env::set_var("KEEL_CACHE_DIR", ".cache/keel");
            std::env::set_var("KEEL_ENGINE", "npx esbuild");
        }

        let result = FileConfigResolver::new(dir.path()).resolve(&PartialConfig::default());
        clear_env();
        let config = result.unwrap();

        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(config.minify);
        assert!(!config.anti_crash);
        assert_eq!(config.cache_dir, PathBuf::from(".cache/keel"));
    }

    #[test]
    #[serial]
    fn test_env_keys_map_to_config_keys() {
        clear_env();
        unsafe {
            std::env::set_var("KEEL_OUT_DIR", "out");
            std::env::set_var("KEEL_ANTI_CRASH", "false");
            std::env::set_var("KEEL_ENGINE", "npx esbuild");
        }

        let data = figment::Figment::from(crate::config::loading::env_provider())
            .extract::<serde_json::Value>();
        clear_env();
        let data = data.unwrap();

        assert_eq!(data["outDir"], "out");
        assert_eq!(data["antiCrash"], false);
        assert!(data.get("outdir").is_none());
        assert!(data.get("engine").is_none());
    }

    #[test]
    #[serial]
    fn test_overrides_beat_env_and_file() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts", "main": "index.js", "outDir": "dist" }"#);
        unsafe { std::env::set_var("KEEL_OUT_DIR", "out") };

        let overrides = PartialConfig {
            out_dir: Some(PathBuf::from("release")),
            main: Some(PathBuf::from("server.js")),
            ..Default::default()
        };
        let result = FileConfigResolver::new(dir.path()).resolve(&overrides);
        clear_env();
        let config = result.unwrap();

        assert_eq!(config.out_dir, PathBuf::from("release"));
        assert_eq!(config.main, PathBuf::from("server.js"));
        assert_eq!(config.src, SourcePatterns::One("src/**/*.ts".into()));
    }

    #[test]
    #[serial]
    fn test_no_file_from_overrides_alone() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let overrides = PartialConfig {
            src: Some("src/**/*.ts".into()),
            main: Some(PathBuf::from("index.js")),
            ..Default::default()
        };
        let config = FileConfigResolver::new(dir.path()).resolve(&overrides).unwrap();
        assert_eq!(config.main, PathBuf::from("index.js"));
    }

    #[test]
    #[serial]
    fn test_missing_required_field() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts" }"#);

        let err = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap_err();
        match err {
            ConfigError::MissingField { field, .. } => assert_eq!(field, "main"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_no_sources_at_all() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let err = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    #[serial]
    fn test_unknown_field_rejected() {
        clear_env();
        let dir = project(r#"{ "src": "src/**/*.ts", "main": "index.js", "format": "cjs" }"#);

        let err = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    #[serial]
    fn test_validation_runs_after_merge() {
        clear_env();
        let dir = project(r#"{ "src": "!src/**/*.test.ts", "main": "index.js" }"#);

        let err = FileConfigResolver::new(dir.path())
            .resolve(&PartialConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "src"));
    }

    #[test]
    #[serial]
    fn test_explicit_config_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/prod.json"),
            r#"{ "src": "src/**/*.ts", "main": "index.js", "minify": true }"#,
        )
        .unwrap();

        let config = FileConfigResolver::new(dir.path())
            .with_config_file(Some(PathBuf::from("config/prod.json")))
            .resolve(&PartialConfig::default())
            .unwrap();
        assert!(config.minify);
    }

    #[test]
    #[serial]
    fn test_explicit_config_file_missing() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let err = FileConfigResolver::new(dir.path())
            .with_config_file(Some(PathBuf::from("nope.json")))
            .resolve(&PartialConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(path) if path.ends_with("nope.json")));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = example_config();
        config.validate().unwrap();

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("outDir").is_some());
        assert!(json.get("antiCrash").is_some());
        assert!(json.get("out_dir").is_none());
    }
}
