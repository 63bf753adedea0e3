//! Input-resolution configuration.
//! One configurable data directory replaces the per-deployment path
//! variants: env var first, then an optional `dashboard.json` next to the
//! working directory, then `./data`.

use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "DASHBOARD_DATA_DIR";
pub const CONFIG_FILE: &str = "dashboard.json";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment and the
    /// optional config file in `base_dir`.
    pub fn resolve(base_dir: &Path) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                info!("data dir from {}: {}", DATA_DIR_ENV, dir);
                return Self {
                    data_dir: PathBuf::from(dir),
                };
            }
        }

        let config_path = base_dir.join(CONFIG_FILE);
        if let Some(config) = Self::from_file(&config_path) {
            info!("data dir from {}: {}", CONFIG_FILE, config.data_dir.display());
            return config;
        }

        Self::default()
    }

    /// Parse a config file; unreadable or malformed files fall through to
    /// the default rather than failing startup.
    fn from_file(path: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_to_data_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join(CONFIG_FILE));
        assert!(config.is_none());
        assert_eq!(AppConfig::default().data_dir, PathBuf::from("data"));
    }

    #[test]
    fn reads_data_dir_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "data_dir": "/srv/dashboards/acme" }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/dashboards/acme"));
    }

    #[test]
    fn malformed_config_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::from_file(&path).is_none());
    }
}
