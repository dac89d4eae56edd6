#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::KretConfig;

// Fallback config file path when no config directory is available
const CONFIG_FILE_PATH: &str = "config/kret.toml";

// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "KRET_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// Load the configuration from the default location
pub fn load_config_from_file() -> Result<KretConfig, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

/// Reads and validates the config at `path`, writing the defaults there first
/// if the file does not exist yet.
pub fn load_config_from_path(path: &Path) -> Result<KretConfig, ConfigError> {
    if !path.exists() {
        let default_config = KretConfig::default();
        save_config_to_path(&default_config, path)?;
        info!("Wrote default configuration to {}", path.display());
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path)?;
    let config: KretConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config_to_path(config: &KretConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;
    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("kret").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}
