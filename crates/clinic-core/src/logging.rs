//! Structured logging setup using tracing.
//!
//! Repositories and the API object emit `tracing` events with record ids as
//! fields; this module installs the subscriber that renders them.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{ConfigError, LoggingConfig};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this again once
/// a subscriber is installed does nothing.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let log_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clinic_core={}", log_level)));

    let mut layers = Vec::new();
    if config.json {
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_filter(env_filter)
                .boxed(),
        );
    } else {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(env_filter)
                .boxed(),
        );
    }

    if tracing_subscriber::registry().with(layers).try_init().is_err() {
        tracing::debug!("Logging already initialized");
        return Ok(());
    }

    tracing::info!(level = %log_level, json = config.json, "Logging initialized");
    Ok(())
}

/// Parse log level from string
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level, ConfigError> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::Invalid(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("TRACE").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_init_rejects_bad_level() {
        let config = LoggingConfig {
            level: "loud".into(),
            json: false,
        };
        assert!(init_logging(&config).is_err());
    }
}
