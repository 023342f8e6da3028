//! Lifecycle error types.

use thiserror::Error;

use crate::cache::CacheError;
use crate::fetch::FetchError;

/// Errors raised while installing or activating a worker, or while
/// decoding a control message.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A manifest entry could not be fetched, or answered with a
    /// non-success status. Nothing was written to the static store.
    #[error("Failed to populate '{store}' from manifest: {url}: {reason}")]
    ManifestPopulation {
        store: String,
        url: String,
        reason: String,
    },

    /// A manifest path could not be resolved against the origin.
    #[error("Invalid manifest entry: {0}")]
    InvalidManifest(#[from] FetchError),

    /// The cache backend failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// A control message was not valid JSON or had the wrong shape.
    #[error("Invalid control message: {0}")]
    InvalidMessage(String),
}
