//! Shell configuration
//!
//! Settings come from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. `sqlplay.toml` in the working directory (or the file given with `--config`)
//! 3. environment variables, optionally from a `.env` file
//! 4. command-line flags, applied by the binary
//!
//! ## Environment Variables
//!
//! - `SQLPLAY_DATA_DIR` - Directory holding the store and line history
//! - `SQLPLAY_PERSIST` - `false`/`0`/`no`/`off` keeps everything in memory
//! - `SQLPLAY_LOG` - tracing filter directive

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "sqlplay.toml";

/// Environment variable names
pub const ENV_DATA_DIR: &str = "SQLPLAY_DATA_DIR";
pub const ENV_PERSIST: &str = "SQLPLAY_PERSIST";
pub const ENV_LOG: &str = "SQLPLAY_LOG";

/// Filter used when none is configured
pub const DEFAULT_LOG_FILTER: &str = "sqlplay=warn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for `store.json` and the line history
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Line history file; `<data_dir>/history` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
    /// Save the catalog after each change
    #[serde(default = "default_persist")]
    pub persist: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".sqlplay")
}

fn default_persist() -> bool {
    true
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_file: None,
            persist: default_persist(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads `sqlplay.toml` and `.env` from `dir`. Both are optional.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }

        let config_path = dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads an explicit config file, which must exist.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(persist) = std::env::var(ENV_PERSIST) {
            if let Some(flag) = parse_flag(&persist) {
                self.persist = flag;
            }
        }

        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.is_empty() {
                self.log_filter = filter;
            }
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("history"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from(".sqlplay"));
        assert!(config.persist);
        assert_eq!(config.history_path(), PathBuf::from(".sqlplay/history"));
        assert_eq!(config.log_filter, "sqlplay=warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("persist = false\n").unwrap();
        assert!(!config.persist);
        assert_eq!(config.data_dir, PathBuf::from(".sqlplay"));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: PathBuf::from("/tmp/play"),
            history_file: Some(PathBuf::from("/tmp/play.history")),
            persist: false,
            log_filter: "sqlplay=debug".to_string(),
        };
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            toml::to_string_pretty(&config).unwrap(),
        )
        .unwrap();

        let loaded = Config::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.history_path(), PathBuf::from("/tmp/play.history"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "persist = \"sometimes\"").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("OFF"), Some(false));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
