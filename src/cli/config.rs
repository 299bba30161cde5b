//! CLI configuration parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default store directory.
pub const DEFAULT_STORE_PATH: &str = ".gift-survey";

/// Default catalog document.
pub const DEFAULT_CATALOG_PATH: &str = "questions.json";

/// Configuration loaded from a TOML file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store and catalog locations.
    pub store: StoreConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Where survey data lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the store directory.
    pub path: PathBuf,
    /// Path to the question catalog.
    pub catalog: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"warn"` or `"gift_survey=debug"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"`, or a file path to append to.
    pub output: String,
    pub timestamps: bool,
    /// ANSI colors when writing to a terminal.
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            timestamps: true,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
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
[store]
path = "/var/lib/gift-survey"
catalog = "data/questions.json"

[logging]
level = "gift_survey=debug"
format = "json"
output = "survey.log"
timestamps = false
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/var/lib/gift-survey"));
        assert_eq!(config.store.catalog, PathBuf::from("data/questions.json"));
        assert_eq!(config.logging.level, "gift_survey=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "survey.log");
        assert!(!config.logging.timestamps);
        assert!(config.logging.color);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.store.catalog, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::from_file_or_default("/nonexistent/gift-survey.toml").unwrap();
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_str("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
