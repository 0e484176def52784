//! Property-based tests for generator configuration

use autofactory_config::*;
use proptest::prelude::*;

/// Extensions made of one or more non-empty dot-separated segments (`cs`, `g.cs`, `gen.g.vb`)
fn extension_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9]{0,3}", 1..4).prop_map(|segments| segments.join("."))
}

proptest! {
    /// Any bare extension, including multi-dot ones, survives validation and a save/load cycle
    #[test]
    fn prop_multi_dot_extensions_are_accepted(extension in extension_strategy()) {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GeneratorConfig {
            output_extension: extension.clone(),
            ..Default::default()
        };
        prop_assert!(config.validate().is_ok());

        let manager = ConfigManager::with_path(dir.path().join(CONFIG_FILE_NAME))
            .with_env_prefix("AFPROPEXT");
        manager.save_config(&config).unwrap();
        let loaded = manager.load_config().unwrap();
        prop_assert_eq!(loaded.output_extension, extension);
    }

    /// Empty segments or path separators make an extension invalid
    #[test]
    fn prop_malformed_extensions_are_rejected(
        extension in extension_strategy(),
        defect in prop::sample::select(vec![".", "..", "/", "\\"]),
        leading in any::<bool>(),
    ) {
        let output_extension = if leading {
            format!("{defect}{extension}")
        } else {
            format!("{extension}{defect}")
        };
        let config = GeneratorConfig {
            output_extension,
            ..Default::default()
        };
        prop_assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
