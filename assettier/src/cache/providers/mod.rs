//! Cache storage backends.
//!
//! Each backend implements [`CacheStorage`](crate::cache::CacheStorage) and
//! [`CacheStore`](crate::cache::CacheStore). Prefer creating them through
//! [`StorageConfig::open`](crate::cache::StorageConfig::open).
//!
//! # Available Backends
//!
//! - [`MemoryCacheStorage`]: in-memory stores using moka
//! - [`DiskCacheStorage`]: one directory per store, one file per entry

mod disk;
mod memory;

pub use disk::{DiskCacheStorage, DiskCacheStore};
pub use memory::{MemoryCacheStorage, MemoryCacheStore};
