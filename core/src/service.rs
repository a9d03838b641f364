//! Asynchronous caller-facing API.
//!
//! `HeroService` pairs one configured `HeroClient` with one injected
//! `Transport` and reuses both across calls. Every call is independent:
//! one request per call (none when the input is rejected), no caching, no
//! retry, no shared mutable state.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::cancel::{self, CancelHandle, CancelToken};
use crate::client::HeroClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{HeroDetail, SearchResult};

pub struct HeroService<T> {
    client: HeroClient,
    transport: Arc<T>,
}

impl<T> Clone for HeroService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

#[cfg(feature = "reqwest")]
impl HeroService<crate::transport::ReqwestTransport> {
    /// Service over a fresh `ReqwestTransport`.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(config, crate::transport::ReqwestTransport::new())
    }
}

impl<T: Transport> HeroService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    pub fn with_shared_transport(config: ClientConfig, transport: Arc<T>) -> Self {
        Self {
            client: HeroClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &HeroClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Search heroes by name. An empty `results` list is a successful answer.
    pub async fn search_heroes(&self, query: &str) -> Result<SearchResult, ApiError> {
        let request = self.client.build_search_heroes(query)?;
        let response = self.transport.execute(request).await?;
        let result = self.client.parse_search_heroes(response);
        match &result {
            Ok(found) => debug!(query, hits = found.results.len(), "search completed"),
            Err(e) => warn!(query, error = %e, "search failed"),
        }
        result
    }

    /// Fetch the full record for an id taken from a `HeroSummary`.
    pub async fn get_hero(&self, id: &str) -> Result<HeroDetail, ApiError> {
        let request = self.client.build_get_hero(id)?;
        let response = self.transport.execute(request).await?;
        let result = self.client.parse_get_hero(response);
        match &result {
            Ok(hero) => debug!(id, name = %hero.name, "hero loaded"),
            Err(e) => warn!(id, error = %e, "hero lookup failed"),
        }
        result
    }

    pub async fn search_heroes_cancellable(
        &self,
        query: &str,
        token: CancelToken,
    ) -> Result<SearchResult, ApiError> {
        token.run(self.search_heroes(query)).await
    }

    pub async fn get_hero_cancellable(
        &self,
        id: &str,
        token: CancelToken,
    ) -> Result<HeroDetail, ApiError> {
        token.run(self.get_hero(id)).await
    }
}

/// Search wrapper for type-ahead callers: starting a search cancels the
/// previous one, so a response for an outdated query is never delivered.
pub struct LatestSearch<T> {
    service: HeroService<T>,
    current: Mutex<Option<CancelHandle>>,
}

impl<T: Transport> LatestSearch<T> {
    pub fn new(service: HeroService<T>) -> Self {
        Self {
            service,
            current: Mutex::new(None),
        }
    }

    pub fn service(&self) -> &HeroService<T> {
        &self.service
    }

    /// Run a search, superseding any search still in flight. A superseded
    /// call resolves to `ApiError::Cancelled`.
    pub async fn search(&self, query: &str) -> Result<SearchResult, ApiError> {
        let token = self.supersede();
        self.service.search_heroes_cancellable(query, token).await
    }

    /// Cancel the in-flight search, if any.
    pub fn cancel(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = current.take() {
            handle.cancel();
        }
    }

    fn supersede(&self) -> CancelToken {
        let (handle, token) = cancel::pair();
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = current.replace(handle) {
            debug!("superseding in-flight search");
            previous.cancel();
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use async_trait::async_trait;

    struct Fixed(u16, &'static str);

    #[async_trait]
    impl Transport for Fixed {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse::new(self.0, self.1))
        }
    }

    fn service(status: u16, body: &'static str) -> HeroService<Fixed> {
        HeroService::new(ClientConfig::new("http://stub/api", "tok"), Fixed(status, body))
    }

    #[tokio::test]
    async fn search_returns_decoded_result() {
        let svc = service(200, r#"{"response":"success","results":[]}"#);
        let result = svc.search_heroes("nobody").await.unwrap();
        assert!(result.results.is_empty());
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let svc = service(200, "{}");
        assert!(matches!(svc.search_heroes("").await, Err(ApiError::InvalidInput(_))));
        assert!(matches!(svc.get_hero("").await, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let svc = service(502, "bad gateway");
        let err = svc.get_hero("70").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn clones_share_the_transport() {
        let svc = service(200, "{}");
        let clone = svc.clone();
        assert!(std::ptr::eq(svc.transport(), clone.transport()));
    }

    #[tokio::test]
    async fn latest_search_cancel_without_search_is_noop() {
        let latest = LatestSearch::new(service(200, r#"{"response":"success","results":[]}"#));
        latest.cancel();
        assert!(latest.search("batman").await.is_ok());
    }
}
