//! Client configuration parsing.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the local item store.
pub const DEFAULT_STORE_PATH: &str = ".status-kv";

/// Configuration loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Table binding for the client.
    pub client: ClientConfig,
    /// Local store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which table the client talks to and how it is keyed.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Table name.
    pub table: String,
    /// Name of the table's primary-key attribute.
    pub key_attribute: String,
}

/// Local item store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the store directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive such as `info` or `status_kv=debug`.
    pub level: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[client]
table = "statuses"
key_attribute = "id"

[store]
path = "/var/lib/status-kv"

[logging]
level = "status_kv=debug"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.client.table, "statuses");
        assert_eq!(config.client.key_attribute, "id");
        assert_eq!(config.store.path, PathBuf::from("/var/lib/status-kv"));
        assert_eq!(config.logging.level.as_deref(), Some("status_kv=debug"));
    }

    #[test]
    fn test_defaults() {
        let toml = r#"
[client]
table = "statuses"
key_attribute = "id"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_STORE_PATH));
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_missing_client_section() {
        let err = Config::from_str("[store]\npath = \"x\"\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
