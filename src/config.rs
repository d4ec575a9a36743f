use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Service configuration loaded from environment variables.
///
/// This covers process-level settings only; the announcement settings
/// (webhook URL, bot identity, message template) live in the settings store
/// and are loaded per publish event.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server (trigger + settings API)
    pub web_host: String,
    pub web_port: u16,

    // Database
    pub database_path: PathBuf,

    // Outbound webhook delivery
    pub request_timeout: Duration,

    // Post types that exist on the host CMS; install-time defaults are
    // restricted to these.
    pub host_post_types: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
            database_path: PathBuf::from(env_or_default("DATABASE_PATH", "./data/announcer.sqlite")),
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 10)?),
            host_post_types: parse_list(&env_or_default("HOST_POST_TYPES", "post,page")),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.web_host.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "WEB_HOST".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.host_post_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "HOST_POST_TYPES".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// A configuration suitable for tests: loopback server, short timeout.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            database_path: PathBuf::from("./data/test.sqlite"),
            request_timeout: Duration::from_secs(5),
            host_post_types: vec!["post".to_string(), "page".to_string()],
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
