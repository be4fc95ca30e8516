//! Configuration management for the contact form server.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file loaded first.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the contact form server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Directory receiving persons.csv and companies.csv (default: var/contacts)
    pub storage_dir: PathBuf,

    /// Base URL of the commune lookup API (default: https://geo.api.gouv.fr)
    pub commune_api_url: String,

    /// Optional bearer key for the commune lookup API
    pub commune_api_key: Option<String>,

    /// Outbound HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// CSRF token lifetime in minutes (default: 60)
    pub csrf_token_ttl_minutes: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CONTACT_BIND_ADDR`: listen address (default: 127.0.0.1:8000)
    /// - `CONTACT_STORAGE_DIR`: CSV directory (default: var/contacts)
    /// - `COMMUNE_API_URL`: commune lookup base URL (default: https://geo.api.gouv.fr)
    /// - `COMMUNE_API_KEY`: bearer key for the commune lookup
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `CSRF_TOKEN_TTL_MINUTES`: CSRF token lifetime (default: 60)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let bind_addr = match env::var("CONTACT_BIND_ADDR") {
            Ok(val) => val.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "CONTACT_BIND_ADDR".to_string(),
                reason: format!("Must be a socket address like 127.0.0.1:8000, got: {}", val),
            })?,
            Err(_) => defaults.bind_addr,
        };

        let storage_dir = match env::var("CONTACT_STORAGE_DIR") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACT_STORAGE_DIR".to_string(),
                    reason: "Cannot be empty".to_string(),
                })
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => defaults.storage_dir,
        };

        let commune_api_url =
            env::var("COMMUNE_API_URL").unwrap_or(defaults.commune_api_url);

        // Validate API URL format
        if !commune_api_url.starts_with("http://") && !commune_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "COMMUNE_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let commune_api_key = env::var("COMMUNE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        let csrf_token_ttl_minutes =
            Self::parse_env_u64("CSRF_TOKEN_TTL_MINUTES", defaults.csrf_token_ttl_minutes)?;

        if csrf_token_ttl_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CSRF_TOKEN_TTL_MINUTES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            bind_addr,
            storage_dir,
            commune_api_url,
            commune_api_key,
            request_timeout,
            csrf_token_ttl_minutes,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            storage_dir: PathBuf::from("var/contacts"),
            commune_api_url: "https://geo.api.gouv.fr".to_string(),
            commune_api_key: None,
            request_timeout: 10,
            csrf_token_ttl_minutes: 60,
            log_level: "info".to_string(),
        }
    }
}
