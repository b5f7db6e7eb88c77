//! Configuration management for sensord

pub mod schema;

pub use schema::{CacheConfig, Config, SensorsConfig, ServerConfig};

use crate::error::{SensordError, SensordResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sensord")
            .join("config.toml")
    }

    /// Path this manager reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, falling back to defaults if no file exists
    pub async fn load(&self) -> SensordResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> SensordResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SensordError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| SensordError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> SensordResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            SensordError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> SensordResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SensordError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml"));
        let config = manager.load().await.unwrap();
        assert_eq!(config.cache.interval_secs, 60);
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.toml"));

        let mut config = Config::default();
        config.server.listen = "127.0.0.1:9090".to_string();
        config.cache.interval_secs = 15;
        manager.save(&config).await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.server.listen, "127.0.0.1:9090");
        assert_eq!(loaded.cache.interval_secs, 15);
    }

    #[tokio::test]
    async fn invalid_toml_is_rejected_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "not [valid toml").await.unwrap();

        let manager = ConfigManager::with_path(path.clone());
        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, SensordError::ConfigInvalid { path: p, .. } if p == path));
    }
}
