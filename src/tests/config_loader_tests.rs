#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::KretConfig;
    use crate::config::loader::{ConfigError, load_config_from_path, save_config_to_path};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    // Helper function to create a test config path
    fn create_test_config_path() -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("nested").join("kret.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_load_nonexistent_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let config = load_config_from_path(&config_path).expect("Failed to load default config");

        assert!(config_path.exists(), "Config file should have been created");
        assert_eq!(config, KretConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let (_temp_dir, config_path) = create_test_config_path();

        let mut config = KretConfig::default();
        config.board.width = 32;
        config.timing.speed_multiplier = 2;
        config.seed = Some(1234);
        save_config_to_path(&config, &config_path).expect("Failed to save config");

        let loaded_config = load_config_from_path(&config_path).expect("Failed to load config");

        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_malformed_config() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "invalid toml content ! @ #").expect("Failed to write config");

        match load_config_from_path(&config_path) {
            Err(ConfigError::Parse(_)) => {}
            Ok(_) => panic!("Expected error when loading invalid config"),
            Err(e) => panic!("Unexpected error type: {e:?}"),
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let (_temp_dir, config_path) = create_test_config_path();
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[board]\nwidth = 2\n").expect("Failed to write config");

        assert!(matches!(
            load_config_from_path(&config_path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
