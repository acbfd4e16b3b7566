//! Connection settings read from the environment.

use std::time::Duration;

use church_admin_api::{Client, DEFAULT_TIMEOUT};
use url::Url;

use crate::error::AdminError;

pub const API_URL_VAR: &str = "CHURCH_ADMIN_API_URL";
pub const API_TOKEN_VAR: &str = "CHURCH_ADMIN_API_TOKEN";
pub const TIMEOUT_VAR: &str = "CHURCH_ADMIN_TIMEOUT_SECS";

/// Where the admin API lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Absolute base URL, without a trailing slash.
    pub api_url: String,
    /// Bearer token. How it is obtained is up to the caller.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl AdminConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, AdminError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AdminError::Config(format!("{} is not set", API_URL_VAR)))?;
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    AdminError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => DEFAULT_TIMEOUT,
        };
        Self::new(&api_url, lookup(API_TOKEN_VAR), timeout)
    }

    pub fn new(api_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, AdminError> {
        let parsed = Url::parse(api_url.trim())
            .map_err(|e| AdminError::Config(format!("invalid API URL '{}': {}", api_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AdminError::Config(format!(
                "API URL must use http or https, got '{}'",
                api_url
            )));
        }
        Ok(Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            timeout,
        })
    }

    pub fn client(&self) -> Result<Client, AdminError> {
        Ok(Client::with_timeout(
            &self.api_url,
            self.token.clone(),
            self.timeout,
        )?)
    }
}
