//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "application.toml",
    "access-control.toml",
    "./config/config.toml",
    "/etc/access-control/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match self.find_config_file() {
            Some(path) => {
                info!(?path, "Loading configuration from file");
                AppConfig::from_file(&path)?
            }
            None => AppConfig::default(),
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(?path, "Configured file not found, searching defaults");
        }

        if let Ok(path) = env::var("ACCESS_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply overrides read through `lookup`, which maps a variable name to its value.
pub(crate) fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // HTTP
    if let Some(val) = lookup("ACCESS_HTTP_HOST") {
        config.http.host = val;
    }
    if let Some(val) = lookup("ACCESS_HTTP_PORT") {
        config.http.port = parse_var("ACCESS_HTTP_PORT", &val)?;
    }
    if let Some(val) = lookup("ACCESS_CORS_ORIGINS").or_else(|| lookup("BACKEND_CORS_ORIGINS")) {
        config.http.cors_origins = parse_origins(&val)?;
    }

    // Database
    if let Some(val) = lookup("ACCESS_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
        config.database.url = val;
    }
    if let Some(val) = lookup("ACCESS_DATABASE_MAX_CONNECTIONS") {
        config.database.max_connections = parse_var("ACCESS_DATABASE_MAX_CONNECTIONS", &val)?;
    }

    // Security
    if let Some(val) = lookup("ACCESS_PASSWORD_MIN_LENGTH") {
        config.security.password_min_length = parse_var("ACCESS_PASSWORD_MIN_LENGTH", &val)?;
    }

    // General
    if let Some(val) = lookup("ACCESS_DEV_MODE") {
        config.dev_mode = matches!(val.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes");
    }

    Ok(())
}

fn parse_var<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} has invalid value '{}'", key, val)))
}

/// Parse a CORS origin list given either as a JSON array or comma-separated.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        let origins: Vec<String> = serde_json::from_str(raw)
            .map_err(|e| ConfigError::EnvError(format!("Invalid CORS origin list: {}", e)))?;
        return Ok(origins.into_iter().map(|o| o.trim().to_string()).collect());
    }

    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
