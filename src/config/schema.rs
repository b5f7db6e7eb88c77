//! Configuration schema for sensord
//!
//! Configuration is stored at `~/.config/sensord/config.toml`. Every field
//! has a default, so a missing file or empty table yields a working daemon.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Refresh cache settings
    pub cache: CacheConfig,

    /// Sensor producer settings
    pub sensors: SensorsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address and port to listen on
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Refresh cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds between refresh attempts; also the per-update budget
    pub interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Sensor producer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    /// Command producing the classic readings
    pub command: String,

    /// Seconds before the command's process is killed
    pub command_timeout_secs: u64,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            command: "sensors".to_string(),
            command_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.cache.interval_secs, 60);
        assert_eq!(config.sensors.command, "sensors");
        assert!(config.sensors.command_timeout_secs < config.cache.interval_secs);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.cache.interval_secs, 60);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str("[cache]\ninterval_secs = 5\n").unwrap();
        assert_eq!(config.cache.interval_secs, 5);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }
}
