//! Stateless HTTP request builder and response parser for the superhero API.
//!
//! # Design
//! `HeroClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Something else executes the round-trip in between: a
//! `Transport` inside `HeroService`, or the host application over FFI.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{HeroDetail, SearchResult};

/// Synchronous, stateless client for the superhero API.
#[derive(Debug, Clone)]
pub struct HeroClient {
    config: ClientConfig,
}

impl HeroClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {base}/{token}/search/{query}` with the query percent-encoded.
    /// The token is encoded too, so it always stays one path segment.
    pub fn build_search_heroes(&self, query: &str) -> Result<HttpRequest, ApiError> {
        if query.trim().is_empty() {
            return Err(ApiError::InvalidInput("search query must not be empty".to_string()));
        }
        let token = urlencoding::encode(self.config.access_token());
        let url = format!(
            "{}/{}/search/{}",
            self.config.base_url(),
            token,
            urlencoding::encode(query)
        );
        let req = HttpRequest::get(url, &token);
        debug!(url = %req.redacted_url(), "built search request");
        Ok(req)
    }

    /// `GET {base}/{token}/{id}` with the id percent-encoded. Blank ids are
    /// rejected the same way blank queries are.
    pub fn build_get_hero(&self, id: &str) -> Result<HttpRequest, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("hero id must not be empty".to_string()));
        }
        let token = urlencoding::encode(self.config.access_token());
        let url = format!(
            "{}/{}/{}",
            self.config.base_url(),
            token,
            urlencoding::encode(id)
        );
        let req = HttpRequest::get(url, &token);
        debug!(url = %req.redacted_url(), "built hero request");
        Ok(req)
    }

    pub fn parse_search_heroes(&self, response: HttpResponse) -> Result<SearchResult, ApiError> {
        decode(response)
    }

    pub fn parse_get_hero(&self, response: HttpResponse) -> Result<HeroDetail, ApiError> {
        decode(response)
    }
}

/// The upstream's error shape: `{"response":"error","error":"..."}`.
#[derive(Deserialize)]
struct Envelope {
    response: Option<String>,
    error: Option<String>,
}

/// Map non-success status codes to `ApiError::Transport`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "upstream returned non-success status");
    Err(ApiError::transport(Some(response.status), response.body.clone()))
}

/// Surface an upstream error envelope before attempting the typed decode, so
/// "not found" is reported as such instead of as a missing-field error.
fn check_envelope(body: &str) -> Result<(), ApiError> {
    let Ok(envelope) = serde_json::from_str::<Envelope>(body) else {
        return Ok(());
    };
    if envelope.response.as_deref() == Some("error") {
        let message = envelope.error.unwrap_or_else(|| "unspecified error".to_string());
        debug!(%message, "upstream reported an error");
        return Err(ApiError::Upstream(message));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    check_envelope(&response.body)?;
    serde_json::from_str(&response.body).map_err(|e| {
        warn!(error = %e, "response did not match the expected shape");
        ApiError::Decode(e.to_string())
    })
}
