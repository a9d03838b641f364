//! API client core for the superhero database.
//!
//! # Overview
//! Two read-only operations against one remote JSON API: search heroes by
//! name, and fetch one hero's full record by id. Responses decode into
//! immutable value types.
//!
//! # Design
//! - `HeroClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. The FFI crate
//!   exposes exactly this layer so a host app can do its own networking.
//! - `HeroService` is the async surface. It reuses one `HeroClient` and one
//!   `Transport` across calls; tests swap the transport for a double.
//! - `cancel` and `LatestSearch` let callers abandon a request, which closes
//!   the stale-response race between overlapping searches.
//! - The access token is injected through `ClientConfig`, never hard-coded.

pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use cancel::{CancelHandle, CancelToken};
pub use client::HeroClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{HeroService, LatestSearch};
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use types::{Biography, HeroDetail, HeroSummary, PowerStats, Role, SearchResult, StatKind, Work};
