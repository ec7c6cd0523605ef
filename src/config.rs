//! Session configuration.
//!
//! Built in code or read from `AUTHFLOW_*` environment variables. Every
//! field has a default, so an empty environment yields a working local setup.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_KEY: &str = "userToken";
pub const DEFAULT_USERNAME_KEY: &str = "userName";
pub const DEFAULT_STORE_PATH: &str = "authflow.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Scheme, host and port of the auth server.
    pub base_url: String,
    /// Store key holding the token.
    pub token_key: String,
    /// Store key holding the signed-in username.
    pub username_key: String,
    pub store_path: PathBuf,
    /// Upper bound on each remote call.
    pub request_timeout: Duration,
    /// Upper bound on the bootstrap read; on expiry bootstrap proceeds without a token.
    pub storage_timeout: Duration,
    /// Username sent on sign-out when none was recorded at sign-in.
    pub fallback_username: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            username_key: DEFAULT_USERNAME_KEY.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_timeout: Duration::from_millis(DEFAULT_STORAGE_TIMEOUT_MS),
            fallback_username: None,
        }
    }
}

impl AuthConfig {
    /// Build a config from environment variables.
    ///
    /// - `AUTHFLOW_BASE_URL`: auth server (default `http://localhost:8080`)
    /// - `AUTHFLOW_TOKEN_KEY`: store key for the token (default `userToken`)
    /// - `AUTHFLOW_USERNAME_KEY`: store key for the username (default `userName`)
    /// - `AUTHFLOW_STORE_PATH`: JSON store file (default `authflow.json`)
    /// - `AUTHFLOW_REQUEST_TIMEOUT_SECS`: remote call timeout (default 30)
    /// - `AUTHFLOW_STORAGE_TIMEOUT_MS`: bootstrap read timeout (default 2000)
    /// - `AUTHFLOW_FALLBACK_USERNAME`: sign-out username when none is known
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("AUTHFLOW_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_u64("AUTHFLOW_REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };
        let storage_timeout = match lookup("AUTHFLOW_STORAGE_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_u64("AUTHFLOW_STORAGE_TIMEOUT_MS", &raw)?),
            None => defaults.storage_timeout,
        };

        Ok(Self {
            base_url: lookup("AUTHFLOW_BASE_URL").unwrap_or(defaults.base_url),
            token_key: lookup("AUTHFLOW_TOKEN_KEY").unwrap_or(defaults.token_key),
            username_key: lookup("AUTHFLOW_USERNAME_KEY").unwrap_or(defaults.username_key),
            store_path: lookup("AUTHFLOW_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            request_timeout,
            storage_timeout,
            fallback_username: lookup("AUTHFLOW_FALLBACK_USERNAME").filter(|u| !u.is_empty()),
        })
    }
}

fn parse_u64(var: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        value: raw.to_string(),
    })
}
