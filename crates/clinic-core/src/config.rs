//! Configuration for the clinic core.
//!
//! Settings come from a TOML file, then `CLINIC_*` environment variables
//! override individual keys:
//!
//! ```toml
//! environment = "production"
//!
//! [database]
//! path = "/var/lib/clinic/clinic.db"
//!
//! [logging]
//! level = "info"
//! json = true
//! ```
//!
//! | Variable | Key |
//! |---|---|
//! | `CLINIC_ENVIRONMENT` | `environment` |
//! | `CLINIC_DATABASE_PATH` | `database.path` |
//! | `CLINIC_LOG_LEVEL` | `logging.level` |
//! | `CLINIC_LOG_JSON` | `logging.json` |

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::Invalid(format!(
                "Unknown environment '{}'. Must be one of: development, production",
                other
            ))),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// SQLite settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, created on first open
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_database_path() -> String {
    "clinic.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClinicConfig {
    /// Parse a TOML document without consulting the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ClinicConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.path cannot be empty".to_string(),
            ));
        }
        crate::logging::parse_log_level(&self.logging.level)?;
        Ok(())
    }
}

/// Loads configuration from a TOML file and applies `CLINIC_*` overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinicConfig, ConfigError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config: ClinicConfig = toml::from_str(&contents)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

/// Applies overrides from `lookup` (normally the process environment).
fn apply_overrides(
    config: &mut ClinicConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(val) = lookup("CLINIC_ENVIRONMENT") {
        config.environment = val.parse()?;
    }
    if let Some(val) = lookup("CLINIC_DATABASE_PATH") {
        config.database.path = val;
    }
    if let Some(val) = lookup("CLINIC_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = lookup("CLINIC_LOG_JSON") {
        config.logging.json = val.parse().map_err(|_| {
            ConfigError::Invalid(format!("CLINIC_LOG_JSON must be true or false, got '{}'", val))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ClinicConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClinicConfig::default());
        assert_eq!(config.database.path, "clinic.db");
        assert_eq!(config.logging.level, "info");
        assert!(!config.environment.is_production());
    }

    #[test]
    fn test_full_document() {
        let config = ClinicConfig::from_toml_str(
            r#"
            environment = "production"

            [database]
            path = "/var/lib/clinic/clinic.db"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert!(config.environment.is_production());
        assert_eq!(config.database.path, "/var/lib/clinic/clinic.db");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ClinicConfig::from_toml_str("[logging]\nlevel = \"loud\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClinicConfig::from_toml_str("[database]\npath = \"  \""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClinicConfig::from_toml_str("environment = \"staging\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CLINIC_ENVIRONMENT", "PROD"),
            ("CLINIC_DATABASE_PATH", "/tmp/other.db"),
            ("CLINIC_LOG_LEVEL", "warn"),
            ("CLINIC_LOG_JSON", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = ClinicConfig::default();
        apply_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.path, "/tmp/other.db");
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut config = ClinicConfig::default();
        let result = apply_overrides(&mut config, |key| {
            (key == "CLINIC_LOG_JSON").then(|| "yes".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"reception.db\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/clinic.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
