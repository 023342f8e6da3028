//! Network fetch abstraction for testability.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::types::{AssetRequest, AssetResponse, FetchError};
use crate::cache::BoxFuture;

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("assettier/", env!("CARGO_PKG_VERSION"));

/// Trait for issuing network fetches.
///
/// This abstraction allows the router and lifecycle manager to run against
/// a mock transport in tests. It is dyn-compatible so one fetcher can be
/// shared as `Arc<dyn Fetcher>` across spawned tasks.
pub trait Fetcher: Send + Sync {
    /// Fetch a request from the network.
    ///
    /// # Returns
    ///
    /// - `Ok(response)` for any HTTP status
    /// - `Err(_)` only when no response was received
    fn fetch<'a>(&'a self, request: &'a AssetRequest)
        -> BoxFuture<'a, Result<AssetResponse, FetchError>>;
}

/// Fetcher backed by `reqwest`.
///
/// Timeouts are a property of the transport; the router itself never
/// applies one.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a new fetcher with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    async fn fetch_inner(&self, request: &AssetRequest) -> Result<AssetResponse, FetchError> {
        trace!(url = %request, "HTTP GET request starting");

        let response = match self.client.get(request.url().clone()).send().await {
            Ok(resp) => {
                debug!(
                    url = %request,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = %request,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(FetchError::Network(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            warn!(url = %request, error = %e, "Failed to read response body");
            FetchError::Body(e.to_string())
        })?;

        trace!(url = %request, bytes = body.len(), "HTTP response body read");

        let mut asset = AssetResponse::new(status, body);
        if let Some(content_type) = content_type {
            asset = asset.with_content_type(content_type);
        }
        Ok(asset)
    }
}

impl Fetcher for ReqwestFetcher {
    fn fetch<'a>(
        &'a self,
        request: &'a AssetRequest,
    ) -> BoxFuture<'a, Result<AssetResponse, FetchError>> {
        Box::pin(self.fetch_inner(request))
    }
}
