//! Client configuration.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/token/refresh/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Paths of the authentication endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPaths {
    pub login: String,
    pub logout: String,
    pub register: String,
    pub current_user: String,
    pub password_reset: String,
    pub password_reset_confirm: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            login: "/auth/login/".to_string(),
            logout: "/auth/logout/".to_string(),
            register: "/auth/register/".to_string(),
            current_user: "/auth/user/".to_string(),
            password_reset: "/auth/password/reset/".to_string(),
            password_reset_confirm: "/auth/password/reset/confirm/".to_string(),
        }
    }
}

/// Connection settings for the ERP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root every resource path is joined onto.
    pub base_url: String,
    /// Endpoint that extends an expired session (POST, no body).
    pub refresh_path: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    pub auth: AuthPaths,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth: AuthPaths::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auth_paths(mut self, auth: AuthPaths) -> Self {
        self.auth = auth;
        self
    }

    /// Build the configuration from `ERPDESK_*` environment variables.
    ///
    /// - `ERPDESK_API_URL` (default `http://localhost:8000/api`)
    /// - `ERPDESK_REFRESH_PATH` (default `/auth/token/refresh/`)
    /// - `ERPDESK_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("ERPDESK_API_URL") {
            config.base_url = url;
        }
        if let Some(path) = lookup("ERPDESK_REFRESH_PATH") {
            config.refresh_path = path;
        }
        if let Some(raw) = lookup("ERPDESK_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "ERPDESK_TIMEOUT_SECS",
                reason: format!("{raw:?}: {e}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the base URL is an absolute http(s) URL and paths are rooted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            key: "ERPDESK_API_URL",
            reason: format!("{:?}: {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "ERPDESK_API_URL",
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        if !self.refresh_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "ERPDESK_REFRESH_PATH",
                reason: "must start with '/'".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "ERPDESK_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
