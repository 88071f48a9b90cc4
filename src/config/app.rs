//! Application configuration loading from config.toml
//!
//! Server settings, session lifetime and the accounts to seed on start-up are
//! read from a TOML file. Every section is optional and falls back to defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env::VarError, path::Path};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "AQUATRACK_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Accounts to ensure exist on start-up
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Rows per page for customer and order listings
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            page_size: default_page_size(),
        }
    }
}

/// `[session]` section
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of newly created sessions
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
        }
    }
}

/// One `[[users]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    /// Sign-in email, used as the idempotency key
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Token to register as a session for this user
    pub session_token: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

const fn default_page_size() -> u64 {
    10
}

const fn default_ttl_days() -> i64 {
    30
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.server.page_size == 0 {
        return Err(Error::Config {
            message: "server.page_size must be greater than zero".to_string(),
        });
    }
    if config.session.ttl_days <= 0 {
        return Err(Error::Config {
            message: "session.ttl_days must be greater than zero".to_string(),
        });
    }

    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A numeric setting is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Reads an environment variable that may be unset.
///
/// Unset is `None`; a value that is not valid Unicode is an error.
pub fn optional_env(name: &str) -> Result<Option<String>> {
    unset_as_none(std::env::var(name))
}

fn unset_as_none(value: std::result::Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Loads configuration from `AQUATRACK_CONFIG`, or `./config.toml`.
///
/// A missing default file is not an error: built-in defaults are used instead.
pub fn load_default_config() -> Result<AppConfig> {
    if let Some(path) = optional_env(CONFIG_PATH_ENV)? {
        return load_config(path);
    }

    let default_path = Path::new("config.toml");
    if default_path.exists() {
        load_config(default_path)
    } else {
        tracing::info!("No config.toml found, using built-in defaults");
        Ok(AppConfig::default())
    }
}
