//! Client configuration.
//!
//! The access token is part of every request path, so it is always injected
//! here and never compiled into the crate.

use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://superheroapi.com/api";
pub const TOKEN_ENV: &str = "SUPERHERO_API_TOKEN";
pub const BASE_URL_ENV: &str = "SUPERHERO_API_BASE_URL";

/// Where to reach the upstream API and which token to present.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    access_token: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Config pointing at the public service with the given token.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, access_token)
    }

    /// Read `SUPERHERO_API_TOKEN` (required) and `SUPERHERO_API_BASE_URL`
    /// (optional) from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_ENV))?;
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(Self::new(base_url.trim(), token))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
