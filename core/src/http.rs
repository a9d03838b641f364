//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and parses `HttpResponse` values without ever
//! touching the network. Whoever executes the request (a `Transport`
//! implementation, or a host application across the FFI boundary) only has to
//! move bytes.
//!
//! All fields use owned types so values can cross FFI boundaries without
//! lifetime concerns.

use std::fmt;

/// HTTP method for a request. The upstream API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` embeds the access token, so `Debug` prints it with the token masked.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub(crate) token: String,
}

impl HttpRequest {
    pub(crate) fn get(url: String, token: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            token: token.to_string(),
        }
    }

    /// The URL with the access token replaced by `***`, safe for logs.
    pub fn redacted_url(&self) -> String {
        if self.token.is_empty() {
            return self.url.clone();
        }
        self.url.replace(&self.token, "***")
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.redacted_url())
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Produced by whoever executed the matching `HttpRequest`, then passed to
/// `HeroClient::parse_*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_masks_token() {
        let req = HttpRequest::get("https://api.test/abc123/search/batman".to_string(), "abc123");
        let shown = format!("{req:?}");
        assert!(!shown.contains("abc123"));
        assert!(shown.contains("https://api.test/***/search/batman"));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
