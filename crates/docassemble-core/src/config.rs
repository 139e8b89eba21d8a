//! Centralized configuration for the Docassemble client.
//!
//! This module provides network and session constants, the environment
//! variable names the binaries read, and [`ClientConfig`], the settings a
//! [`DocassembleClient`](crate::DocassembleClient) is built from.

use crate::{DocassembleError, Result};
use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
    pub const RETRY_DELAY: Duration = Duration::from_secs(1);
    pub const USER_AGENT: &'static str = concat!("docassemble-mcp/", env!("CARGO_PKG_VERSION"));
    pub const API_KEY_HEADER: &'static str = "X-API-Key";
    /// Status codes retried once by the enhanced request path.
    pub const RETRY_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];
}

/// Interview session and temporary URL defaults.
pub struct SessionConfig;

impl SessionConfig {
    pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(3600);
    /// Server default lifetime of login and resume URLs.
    pub const DEFAULT_URL_EXPIRE_SECS: u64 = 15;
    /// Server default lifetime of `/api/temp_url` redirect URLs.
    pub const DEFAULT_TEMP_URL_EXPIRE_SECS: u64 = 3600;
}

/// Environment variables read by [`ClientConfig::from_env`].
pub struct EnvVars;

impl EnvVars {
    pub const BASE_URL: &'static str = "DOCASSEMBLE_BASE_URL";
    pub const API_KEY: &'static str = "DOCASSEMBLE_API_KEY";
    pub const TIMEOUT: &'static str = "DOCASSEMBLE_TIMEOUT";
    pub const ENABLE_FALLBACKS: &'static str = "DOCASSEMBLE_ENABLE_FALLBACKS";
    pub const AUTO_RETRY: &'static str = "DOCASSEMBLE_AUTO_RETRY";
}

/// Settings for a single Docassemble server connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server root, without a trailing slash.
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Advertised to callers of the enhanced interview helpers.
    pub session_timeout: Duration,
    /// Return placeholder payloads instead of errors for unsupported features.
    pub enable_fallbacks: bool,
    /// Retry once on 5xx gateway errors in the enhanced request path.
    pub auto_retry: bool,
}

impl ClientConfig {
    /// Create a config with default timeouts, fallbacks and retry enabled.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: NetworkConfig::REQUEST_TIMEOUT,
            session_timeout: SessionConfig::DEFAULT_SESSION_TIMEOUT,
            enable_fallbacks: true,
            auto_retry: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_timeout(mut self, session_timeout: Duration) -> Self {
        self.session_timeout = session_timeout;
        self
    }

    pub fn with_fallbacks(mut self, enabled: bool) -> Self {
        self.enable_fallbacks = enabled;
        self
    }

    pub fn with_auto_retry(mut self, enabled: bool) -> Self {
        self.auto_retry = enabled;
        self
    }

    /// Build a config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Split out from [`from_env`](Self::from_env) so tests do not have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DocassembleError::Config {
                    message: format!("{} is not set", key),
                })
        };

        let mut config = Self::new(required(EnvVars::BASE_URL)?, required(EnvVars::API_KEY)?);

        if let Some(raw) = lookup(EnvVars::TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| DocassembleError::Config {
                message: format!("{} must be a number of seconds, got '{}'", EnvVars::TIMEOUT, raw),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(EnvVars::ENABLE_FALLBACKS) {
            config.enable_fallbacks = parse_bool(EnvVars::ENABLE_FALLBACKS, &raw)?;
        }
        if let Some(raw) = lookup(EnvVars::AUTO_RETRY) {
            config.auto_retry = parse_bool(EnvVars::AUTO_RETRY, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL and the key is set.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| DocassembleError::Config {
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DocassembleError::Config {
                message: format!("Base URL must use http or https, got '{}'", parsed.scheme()),
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(DocassembleError::Config {
                message: "API key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DocassembleError::Config {
            message: format!("{} must be a boolean, got '{}'", key, other),
        }),
    }
}
