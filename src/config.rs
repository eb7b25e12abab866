//! Service configuration
//!
//! Every field has a default, so the service runs without a config file. The
//! keyword tables are compiled into the binary and are not configurable.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub batch: BatchSection,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// Interface to bind, e.g. "0.0.0.0" or "127.0.0.1"
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Batch endpoint limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSection {
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> u64 {
    64 * 1024
}

fn default_max_items() -> usize {
    100
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ServiceConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the `PORT` override from the environment, if set
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_port_override(std::env::var("PORT").ok().as_deref())
    }

    /// Replace `server.port` with `value`; an unparseable value is an error
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };

        let port = raw.trim().parse::<u16>().map_err(|e| {
            ConfigError::InvalidConfig(format!("PORT '{raw}' is not a valid port: {e}"))
        })?;
        self.server.port = port;
        Ok(())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.host.parse::<IpAddr>().map_err(|_| {
            ConfigError::InvalidConfig(format!(
                "server.host '{}' is not an IP address",
                self.server.host
            ))
        })?;

        if self.server.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_body_bytes must be at least 1".to_string(),
            ));
        }

        if self.batch.max_items == 0 {
            return Err(ConfigError::InvalidConfig(
                "batch.max_items must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            ConfigError::InvalidConfig(format!(
                "server.host '{}' is not an IP address",
                self.server.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9000
max_body_bytes = 1024

[batch]
max_items = 10
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.batch.max_items, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_body_bytes, 65536);
        assert_eq!(config.batch.max_items, 100);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config = ServiceConfig::from_toml_str("[server]\nport = 8123\n").unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.batch.max_items, 100);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = ServiceConfig::from_toml_str("[server]\nhost = \"not-an-ip\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = ServiceConfig::from_toml_str("[server]\nport = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let result = ServiceConfig::from_toml_str("[batch]\nmax_items = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_bind_addr() {
        let mut config = ServiceConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8081;
        assert_eq!(
            config.bind_addr().unwrap(),
            "127.0.0.1:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert_eq!(ServiceConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_port_override_applied() {
        let mut config = ServiceConfig::default();
        config.apply_port_override(Some("9100")).unwrap();
        assert_eq!(config.server.port, 9100);

        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_unparseable_port_override_rejected() {
        let mut config = ServiceConfig::default();

        let error = config.apply_port_override(Some("80OO")).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfig(_)));
        assert!(error.to_string().contains("80OO"));
        assert_eq!(config.server.port, 8000);

        assert!(config.apply_port_override(Some("70000")).is_err());
        assert!(config.apply_port_override(Some("")).is_err());
    }
}
