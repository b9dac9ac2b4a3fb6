//! Configuration management for the asoka application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `ASOKA_DATA_DIR`: Directory for durable key-value storage (defaults to ~/.local/share/asoka)
//! - `ASOKA_DIST_DIR`: Directory holding the built web assets (defaults to `dist`)
//! - `PORT`: Port of the static host (defaults to 3000)
//! - `API_KEY`: Key for the generative-AI service (optional)
//! - `ASOKA_AI_BASE_URL`: Base URL of the generative-AI service
//! - `ASOKA_LOG_LEVEL`: Log level filter (defaults to "info")
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_AI_BASE_URL, DEFAULT_DATA_SUBDIR, DEFAULT_DIST_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    ENV_VAR_AI_BASE_URL, ENV_VAR_API_KEY, ENV_VAR_DATA_DIR, ENV_VAR_DIST_DIR, ENV_VAR_HOME,
    ENV_VAR_LOG_LEVEL, ENV_VAR_PORT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the asoka application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use asoka::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/var/lib/asoka"),
///     dist_dir: PathBuf::from("dist"),
///     port: 8080,
///     api_key: None,
///     ai_base_url: "http://127.0.0.1:9000".to_string(),
///     log_level: "debug".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory where durable key-value storage lives.
    pub data_dir: PathBuf,

    /// Directory holding the built single-page application.
    pub dist_dir: PathBuf,

    /// Port the static host listens on.
    pub port: u16,

    /// API key of the generative-AI service, if any.
    pub api_key: Option<String>,

    /// Base URL of the generative-AI service.
    pub ai_base_url: String,

    /// Log level filter directive.
    pub log_level: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field("dist_dir", &self.dist_dir)
            .field("port", &self.port)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("ai_base_url", &self.ai_base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            port: DEFAULT_PORT,
            api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory is expanded with `shellexpand` so `~` and `$VARS`
    /// work as expected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - `PORT` is not a valid port number
    /// - The resulting data directory is empty
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_DATA_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let dist_dir = env::var(ENV_VAR_DIST_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DIST_DIR));

        let port = match env::var(ENV_VAR_PORT) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::Config(format!("PORT must be a number between 1 and 65535: {}", e))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let api_key = env::var(ENV_VAR_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());

        let ai_base_url =
            env::var(ENV_VAR_AI_BASE_URL).unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string());

        let log_level =
            env::var(ENV_VAR_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            data_dir,
            dist_dir,
            port,
            api_key,
            ai_base_url,
            log_level,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Dist directory path is empty"
    /// - "Port must not be 0"
    /// - "AI base URL must start with http:// or https://"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.dist_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Dist directory path is empty".to_string()));
        }

        if self.port == 0 {
            return Err(AppError::Config("Port must not be 0".to_string()));
        }

        if !(self.ai_base_url.starts_with("http://") || self.ai_base_url.starts_with("https://")) {
            return Err(AppError::Config(
                "AI base URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
