//! Configuration management for aulatrust.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default application directory name.
const APP_DIR_NAME: &str = "aulatrust";

/// Default case-reference file, relative to the storage base directory.
const CASES_FILE_NAME: &str = "data/trust_cases.csv";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AULATRUST_`)
/// 2. TOML config file at `~/.config/aulatrust/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Case-reference configuration.
    pub cases: CasesConfig,
}

/// Storage-related configuration.
///
/// The two document folders (`entregas` and `materiales`) always live
/// directly under the base directory; their names are part of the storage
/// contract and are not configurable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory holding the document folders.
    /// Defaults to the current working directory.
    pub base_dir: Option<PathBuf>,
}

/// Case-reference lookup configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasesConfig {
    /// Path to the optional case-reference CSV (columns: caso, descripcion).
    /// Defaults to `data/trust_cases.csv` under the storage base directory.
    /// A missing or unparseable file falls back to the built-in case table.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override
    /// earlier): defaults, TOML config file (if it exists), environment
    /// variables prefixed with `AULATRUST_` (sections separated with `__`,
    /// e.g. `AULATRUST_STORAGE__BASE_DIR`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("AULATRUST_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.storage.base_dir {
            if base.is_file() {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "storage base_dir {} is a file, expected a directory",
                        base.display()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Get the storage base directory, resolving defaults if not set.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.storage
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the case-reference file path, resolving defaults if not set.
    #[must_use]
    pub fn cases_path(&self) -> PathBuf {
        self.cases
            .path
            .clone()
            .unwrap_or_else(|| self.base_dir().join(CASES_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_dir_is_cwd() {
        let config = Config::default();
        assert_eq!(config.base_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_default_cases_path() {
        let config = Config::default();
        assert_eq!(config.cases_path(), PathBuf::from("./data/trust_cases.csv"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = Config {
            storage: StorageConfig {
                base_dir: Some(PathBuf::from("/srv/aula")),
            },
            cases: CasesConfig {
                path: Some(PathBuf::from("/etc/aula/cases.csv")),
            },
        };
        assert_eq!(config.base_dir(), PathBuf::from("/srv/aula"));
        assert_eq!(config.cases_path(), PathBuf::from("/etc/aula/cases.csv"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_file_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, "not a directory").unwrap();

        let config = Config {
            storage: StorageConfig {
                base_dir: Some(file),
            },
            cases: CasesConfig::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_serializes_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
