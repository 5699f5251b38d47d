//! Persistent settings for hosts embedding the ledger.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::services::DEFAULT_RECENT_LIMIT;
use crate::utils::app_data_dir;
use crate::utils::persistence::write_atomic;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "ledger.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ledger file; relative paths resolve against the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// `tracing` filter directive, e.g. `ledger_core=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn resolved_data_file(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join(DEFAULT_DATA_FILE),
        }
    }
}

/// Loads and saves [`Config`] under `<base>/config/config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses `$LEDGER_CORE_HOME`, falling back to `~/.ledger_core`.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE),
            base_dir: base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file yields the defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }

    /// Ledger file selected by the saved config.
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.load()?.resolved_data_file(&self.base_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::tmp_path;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.recent_limit, 20);
        assert_eq!(manager.data_file().unwrap(), dir.path().join("ledger.json"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            data_file: Some(PathBuf::from("books/2026.json")),
            recent_limit: 5,
            log_filter: Some("ledger_core=debug".into()),
        };
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            manager.data_file().unwrap(),
            dir.path().join("books").join("2026.json")
        );
        assert!(!tmp_path(manager.config_path()).exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), r#"{"log_filter": "warn"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
        assert_eq!(config.log_filter.as_deref(), Some("warn"));
    }

    #[test]
    fn malformed_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.config_path(), "{not json").unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }
}
