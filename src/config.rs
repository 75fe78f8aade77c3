//! Configuration management for FitTrack
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FittrackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for FitTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Secure session storage settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend API configuration
///
/// The base URL is the single place the backend location is configured;
/// every endpoint path is joined onto it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the gym backend, without a trailing `/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds; `None` keeps the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Which member login endpoint the backend exposes
    #[serde(default)]
    pub login_route: LoginRoute,

    /// Which registration endpoint the backend exposes
    #[serde(default)]
    pub register_route: RegisterRoute,
}

fn default_base_url() -> String {
    "https://gym-backend-0o9y.onrender.com".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            login_route: LoginRoute::default(),
            register_route: RegisterRoute::default(),
        }
    }
}

/// Member login endpoint variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginRoute {
    /// `POST /api/loginuser` with `{phone, password}`
    #[default]
    User,
    /// `POST /api/login` with `{mobile, password}`
    Legacy,
}

impl LoginRoute {
    /// Endpoint path for this variant
    pub fn path(self) -> &'static str {
        match self {
            LoginRoute::User => "/api/loginuser",
            LoginRoute::Legacy => "/api/login",
        }
    }
}

/// Registration endpoint variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegisterRoute {
    /// `POST /api/createmember`
    #[default]
    CreateMember,
    /// `POST /api/register`
    Register,
}

impl RegisterRoute {
    /// Endpoint path for this variant
    pub fn path(self) -> &'static str {
        match self {
            RegisterRoute::CreateMember => "/api/createmember",
            RegisterRoute::Register => "/api/register",
        }
    }
}

/// Secure session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: SessionBackend,

    /// Keyring service name entries are stored under
    #[serde(default = "default_service")]
    pub service: String,
}

fn default_service() -> String {
    "fittrack".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            service: default_service(),
        }
    }
}

/// Where the session blob is kept
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// OS credential store
    #[default]
    Keyring,
    /// Process memory only; nothing survives exit
    Memory,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FittrackError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FittrackError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("FITTRACK_API_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: FITTRACK_API_BASE_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("FITTRACK_API_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(v) => self.api.timeout_seconds = Some(v),
                Err(_) => tracing::warn!("Invalid FITTRACK_API_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(route) = std::env::var("FITTRACK_LOGIN_ROUTE") {
            match route.to_lowercase().as_str() {
                "user" => self.api.login_route = LoginRoute::User,
                "legacy" => self.api.login_route = LoginRoute::Legacy,
                _ => tracing::warn!("Invalid login route: {}, keeping {:?}", route, self.api.login_route),
            }
        }

        if let Ok(backend) = std::env::var("FITTRACK_SESSION_BACKEND") {
            match backend.to_lowercase().as_str() {
                "keyring" => self.session.backend = SessionBackend::Keyring,
                "memory" => self.session.backend = SessionBackend::Memory,
                _ => tracing::warn!("Invalid session backend: {}, using default", backend),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            tracing::debug!(base_url = %base_url, "CLI override: --base-url");
            self.api.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL, the
    /// timeout is zero, or the keyring service name is empty
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            FittrackError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FittrackError::Config(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(FittrackError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.service.trim().is_empty() {
            return Err(
                FittrackError::Config("session.service cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn env_keys() -> [&'static str; 4] {
        [
            "FITTRACK_API_BASE_URL",
            "FITTRACK_API_TIMEOUT_SECONDS",
            "FITTRACK_LOGIN_ROUTE",
            "FITTRACK_SESSION_BACKEND",
        ]
    }

    fn clear_env() {
        for key in env_keys() {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://gym-backend-0o9y.onrender.com");
        assert_eq!(config.api.timeout_seconds, None);
        assert_eq!(config.api.login_route, LoginRoute::User);
        assert_eq!(config.session.backend, SessionBackend::Keyring);
        assert_eq!(config.session.service, "fittrack");
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_service() {
        let mut config = Config::default();
        config.session.service = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
api:
  base_url: http://192.168.1.3:5000
  timeout_seconds: 15
  login_route: legacy
  register_route: register
session:
  backend: memory
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://192.168.1.3:5000");
        assert_eq!(config.api.timeout_seconds, Some(15));
        assert_eq!(config.api.login_route, LoginRoute::Legacy);
        assert_eq!(config.api.register_route.path(), "/api/register");
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.session.service, "fittrack");
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(LoginRoute::User.path(), "/api/loginuser");
        assert_eq!(LoginRoute::Legacy.path(), "/api/login");
        assert_eq!(RegisterRoute::CreateMember.path(), "/api/createmember");
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        clear_env();
        let cli = crate::cli::Cli::default();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    #[serial]
    fn test_cli_base_url_override_wins_over_env() {
        clear_env();
        std::env::set_var("FITTRACK_API_BASE_URL", "http://env.example");
        let cli = crate::cli::Cli {
            base_url: Some("http://cli.example".to_string()),
            ..crate::cli::Cli::default()
        };
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.api.base_url, "http://cli.example");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_apply_env_vars() {
        clear_env();
        std::env::set_var("FITTRACK_API_TIMEOUT_SECONDS", "20");
        std::env::set_var("FITTRACK_LOGIN_ROUTE", "Legacy");
        std::env::set_var("FITTRACK_SESSION_BACKEND", "memory");

        let mut config = Config::default();
        config.apply_env_vars();
        assert_eq!(config.api.timeout_seconds, Some(20));
        assert_eq!(config.api.login_route, LoginRoute::Legacy);
        assert_eq!(config.session.backend, SessionBackend::Memory);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clear_env();
        std::env::set_var("FITTRACK_API_TIMEOUT_SECONDS", "soon");
        std::env::set_var("FITTRACK_SESSION_BACKEND", "floppy");

        let mut config = Config::default();
        config.apply_env_vars();
        assert_eq!(config.api.timeout_seconds, None);
        assert_eq!(config.session.backend, SessionBackend::Keyring);

        clear_env();
    }
}
