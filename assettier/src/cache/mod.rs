//! Named response stores.
//!
//! This module provides the key-value layer the router and lifecycle
//! manager write to:
//!
//! - [`CacheStorage`]: registry of named stores (open, delete, list)
//! - [`CacheStore`]: one store mapping request key → response
//! - Backends in [`providers`]: memory (moka) and disk
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐
//! │ CacheRouter  │   │ LifecycleManager │
//! └──────┬───────┘   └────────┬─────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌─────────────────────────────────────┐
//! │        Arc<dyn CacheStorage>        │
//! │  "valor-3d-v2-optimized"  (static)  │
//! │  "valor-textures-v2"      (texture) │
//! └─────────────────────────────────────┘
//! ```

mod config;
pub mod providers;
mod traits;
mod versions;

pub use config::StorageConfig;
pub use providers::{DiskCacheStorage, MemoryCacheStorage};
pub use traits::{BoxFuture, CacheError, CacheStorage, CacheStore, CachedResponse};
pub use versions::{CacheVersions, DEFAULT_STATIC_VERSION, DEFAULT_TEXTURE_VERSION};
