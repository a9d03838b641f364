//! Error types for the superhero API client.
//!
//! # Design
//! Failures are split by where they happen. `InvalidInput` never reaches the
//! network. `Transport` covers everything between issuing the request and
//! receiving a 2xx response. `Decode` means a 2xx body arrived but did not
//! match the expected shape, which usually signals an upstream contract change.
//! `Upstream` carries the error envelope the service returns with a 200 status.

use thiserror::Error;

/// Upstream messages that mean "nothing matched" rather than a real failure.
const NOT_FOUND_MESSAGES: &[&str] = &["character with given name not found", "invalid id"];

/// Errors returned by `HeroClient` and `HeroService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Empty query or id supplied by the caller. No request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request could not be completed, or the server answered non-2xx.
    /// `status` is `None` when no HTTP response was received at all.
    #[error("transport failed{}: {message}", http_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    /// The response body could not be decoded into the expected type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The service answered with `{"response":"error","error":...}`.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,
}

fn http_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl ApiError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a `Transport` error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the upstream reported that the hero or search term matched
    /// nothing. Callers should present this as "no results", not a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Upstream(msg) => {
                let msg = msg.trim();
                NOT_FOUND_MESSAGES.iter().any(|m| msg.eq_ignore_ascii_case(m))
            }
            ApiError::Transport { status: Some(404), .. } => true,
            _ => false,
        }
    }
}

/// Errors raised while assembling a `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing access token (set {0})")]
    MissingToken(&'static str),

    #[error("base url must not be empty")]
    EmptyBaseUrl,
}
