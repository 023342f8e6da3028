//! Core traits for named response stores.
//!
//! The model follows the host cache API that asset workers are written
//! against: a [`CacheStorage`] holds any number of named [`CacheStore`]s,
//! and each store maps a request key to a response.
//!
//! # Design Principles
//!
//! - **String keys**: the request URL, human-readable in logs
//! - **Whole responses as values**: status, content type and body
//! - **Internal synchronisation**: concurrent reads and writes to the same
//!   store are safe; callers never lock
//! - **Dyn-compatible**: uses `Pin<Box<dyn Future>>` so routers can hold
//!   `Arc<dyn CacheStorage>`
//!
//! # Example
//!
//! ```ignore
//! use assettier::cache::{CacheStorage, MemoryCacheStorage};
//!
//! let storage = MemoryCacheStorage::new();
//! let textures = storage.open("valor-textures-v2").await?;
//! textures.put(request.cache_key(), response).await?;
//! let hit = textures.get(request.cache_key()).await?;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::AssetResponse;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error in a persistent backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored entry could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store name cannot be used by this backend.
    #[error("Invalid store name: '{0}'")]
    InvalidName(String),

    /// Provider-specific error.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Owned, serialisable form of a stored response.
///
/// Persistent backends write this; it keeps the request key alongside the
/// response so stores can list their keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub key: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn from_response(key: &str, response: &AssetResponse) -> Self {
        Self {
            key: key.to_string(),
            status: response.status(),
            content_type: response.content_type().map(str::to_string),
            body: response.body().to_vec(),
        }
    }

    pub fn into_response(self) -> AssetResponse {
        let response = AssetResponse::new(self.status, self.body);
        match self.content_type {
            Some(content_type) => response.with_content_type(content_type),
            None => response,
        }
    }
}

/// A single named store of request key → response.
pub trait CacheStore: Send + Sync {
    /// The store's name (its version tag).
    fn name(&self) -> &str;

    /// Look up a response by request key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(response))` if the key exists
    /// - `Ok(None)` if the key is not found
    /// - `Err(_)` if the backend fails
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<AssetResponse>, CacheError>>;

    /// Store a response under a request key, replacing any existing entry.
    fn put(&self, key: &str, response: AssetResponse) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Delete an entry.
    ///
    /// Returns `Ok(true)` if the key existed.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// All request keys currently stored.
    fn keys(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>>;

    /// Number of stored entries.
    fn len(&self) -> BoxFuture<'_, Result<usize, CacheError>> {
        Box::pin(async move { Ok(self.keys().await?.len()) })
    }
}

/// Registry of named stores.
pub trait CacheStorage: Send + Sync {
    /// Open a store, creating it if it does not exist.
    fn open(&self, name: &str) -> BoxFuture<'_, Result<Arc<dyn CacheStore>, CacheError>>;

    /// Get an existing store without creating it.
    ///
    /// Returns `Ok(None)` if no store with this name exists.
    fn get_store(
        &self,
        name: &str,
    ) -> BoxFuture<'_, Result<Option<Arc<dyn CacheStore>>, CacheError>>;

    /// Whether a store with this name exists.
    fn has(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Delete a store and all of its entries.
    ///
    /// Returns `Ok(true)` if the store existed.
    fn delete(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Names of all existing stores.
    fn names(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>>;

    /// Look a key up in every store, in [`names`](Self::names) order.
    ///
    /// Returns the first hit. Never creates a store: one deleted between
    /// listing and lookup is skipped.
    fn match_any(&self, key: &str) -> BoxFuture<'_, Result<Option<AssetResponse>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            for name in self.names().await? {
                let Some(store) = self.get_store(&name).await? else {
                    continue;
                };
                if let Some(response) = store.get(&key).await? {
                    return Ok(Some(response));
                }
            }
            Ok(None)
        })
    }
}
