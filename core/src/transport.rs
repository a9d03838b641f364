//! Executing `HttpRequest`s.
//!
//! `Transport` is the seam between the sans-IO client and the network.
//! Implementations return non-2xx responses as data; only failures to get a
//! response at all become `ApiError::Transport { status: None, .. }`.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;
    use tracing::warn;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by one shared `reqwest::Client`, so connections are
    /// pooled across calls. Timeouts are left at reqwest's defaults.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
            };

            // `without_url` keeps the token-bearing URL out of error messages.
            let response = builder.send().await.map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, method = request.method.as_str(), url = %request.redacted_url(), "request failed");
                ApiError::transport(None, e.to_string())
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, status, "failed to read response body");
                ApiError::transport(Some(status), e.to_string())
            })?;

            Ok(HttpResponse { status, body })
        }
    }
}
