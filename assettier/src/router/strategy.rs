//! Per-class fetch and cache strategies.
//!
//! Every strategy resolves to a usable response. Network failures fall back
//! to the cache or to a synthesized 404, and cache backend errors are
//! logged and treated as misses, so nothing is ever thrown back across the
//! interception boundary.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::classify::{classify_request, RequestClass};
use crate::cache::{CacheStorage, CacheStore, CacheVersions};
use crate::fetch::{AssetRequest, AssetResponse, Fetcher};
use crate::manifest::Manifest;

/// Body of the 404 synthesized for unreachable textures.
pub const TEXTURE_NOT_FOUND: &str = "Texture not found";

/// Body of the 404 synthesized for every other class.
pub const NOT_FOUND: &str = "Not found";

/// Where a routed response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
    Synthesized,
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResponseSource::Cache => "cache",
            ResponseSource::Network => "network",
            ResponseSource::Synthesized => "synthesized",
        })
    }
}

/// A response chosen by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedResponse {
    pub class: RequestClass,
    pub source: ResponseSource,
    pub response: AssetResponse,
}

impl RoutedResponse {
    fn new(class: RequestClass, source: ResponseSource, response: AssetResponse) -> Self {
        Self {
            class,
            source,
            response,
        }
    }

    fn not_found(class: RequestClass, message: &'static str) -> Self {
        Self::new(
            class,
            ResponseSource::Synthesized,
            AssetResponse::not_found(message),
        )
    }
}

/// The router's decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Not intercepted; the host performs the request itself.
    PassThrough,
    /// Respond with this value.
    Respond(RoutedResponse),
}

impl Interception {
    /// The routed response, if the request was intercepted.
    pub fn routed(&self) -> Option<&RoutedResponse> {
        match self {
            Interception::PassThrough => None,
            Interception::Respond(routed) => Some(routed),
        }
    }

    pub fn into_response(self) -> Option<AssetResponse> {
        match self {
            Interception::PassThrough => None,
            Interception::Respond(routed) => Some(routed.response),
        }
    }
}

/// Routes intercepted requests through class-specific strategies.
///
/// Holds no per-request state; one router serves any number of concurrent
/// requests. The only shared mutable state is the cache storage, which
/// synchronises internally.
#[derive(Clone)]
pub struct CacheRouter {
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    manifest: Arc<Manifest>,
    versions: CacheVersions,
}

impl CacheRouter {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        manifest: Arc<Manifest>,
        versions: CacheVersions,
    ) -> Self {
        Self {
            storage,
            fetcher,
            manifest,
            versions,
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Decide how to answer a request and produce the response.
    pub async fn route(&self, request: &AssetRequest) -> Interception {
        let class = classify_request(request, &self.manifest);
        debug!(url = %request, class = %class, "Routing request");

        let routed = match class {
            RequestClass::PassThrough => return Interception::PassThrough,
            RequestClass::Texture => self.texture_cache_first(request).await,
            RequestClass::Static => self.static_cache_first(request).await,
            RequestClass::Dynamic => self.network_first(request).await,
        };

        debug!(
            url = %request,
            class = %class,
            source = %routed.source,
            status = routed.response.status(),
            "Request routed"
        );
        Interception::Respond(routed)
    }

    /// Cache-first against the texture store, writing 200 responses back.
    async fn texture_cache_first(&self, request: &AssetRequest) -> RoutedResponse {
        let class = RequestClass::Texture;
        let store = self.open_store(&self.versions.texture_tag).await;

        if let Some(store) = &store {
            if let Some(hit) = Self::lookup(store.as_ref(), request).await {
                return RoutedResponse::new(class, ResponseSource::Cache, hit);
            }
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.status() == 200 {
                    if let Some(store) = &store {
                        if let Err(e) = store.put(request.cache_key(), response.clone()).await {
                            warn!(url = %request, error = %e, "Failed to cache texture");
                        }
                    }
                }
                RoutedResponse::new(class, ResponseSource::Network, response)
            }
            Err(e) => {
                debug!(url = %request, error = %e, "Texture fetch failed");
                RoutedResponse::not_found(class, TEXTURE_NOT_FOUND)
            }
        }
    }

    /// Cache-first across all stores, no write-back.
    async fn static_cache_first(&self, request: &AssetRequest) -> RoutedResponse {
        let class = RequestClass::Static;

        if let Some(hit) = self.match_any(request).await {
            return RoutedResponse::new(class, ResponseSource::Cache, hit);
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => RoutedResponse::new(class, ResponseSource::Network, response),
            Err(e) => {
                debug!(url = %request, error = %e, "Static asset fetch failed");
                RoutedResponse::not_found(class, NOT_FOUND)
            }
        }
    }

    /// Network-first, falling back to any cached match.
    async fn network_first(&self, request: &AssetRequest) -> RoutedResponse {
        let class = RequestClass::Dynamic;

        match self.fetcher.fetch(request).await {
            Ok(response) => RoutedResponse::new(class, ResponseSource::Network, response),
            Err(e) => {
                debug!(url = %request, error = %e, "Network fetch failed, trying cache");
                match self.match_any(request).await {
                    Some(hit) => RoutedResponse::new(class, ResponseSource::Cache, hit),
                    None => RoutedResponse::not_found(class, NOT_FOUND),
                }
            }
        }
    }

    async fn open_store(&self, name: &str) -> Option<Arc<dyn CacheStore>> {
        match self.storage.open(name).await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(store = name, error = %e, "Failed to open cache store");
                None
            }
        }
    }

    async fn lookup(store: &dyn CacheStore, request: &AssetRequest) -> Option<AssetResponse> {
        match store.get(request.cache_key()).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(store = store.name(), url = %request, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    async fn match_any(&self, request: &AssetRequest) -> Option<AssetResponse> {
        match self.storage.match_any(request.cache_key()).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(url = %request, error = %e, "Cache match failed");
                None
            }
        }
    }
}
