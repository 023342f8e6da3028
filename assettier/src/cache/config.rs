//! Backend selection for cache storage.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::providers::{DiskCacheStorage, MemoryCacheStorage};
use super::traits::CacheStorage;

/// Which backend holds the named stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// In-memory stores. Nothing survives a restart.
    Memory {
        /// Optional per-store bound on body bytes.
        max_size_bytes: Option<u64>,
    },

    /// Directory-backed stores.
    Disk {
        /// Root directory; each store is a subdirectory.
        directory: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Memory {
            max_size_bytes: None,
        }
    }
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn disk(directory: impl Into<PathBuf>) -> Self {
        StorageConfig::Disk {
            directory: directory.into(),
        }
    }

    /// Short backend name for logs and CLI output.
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Memory { .. } => "memory",
            StorageConfig::Disk { .. } => "disk",
        }
    }

    /// Create the configured storage.
    pub fn open(&self) -> Arc<dyn CacheStorage> {
        match self {
            StorageConfig::Memory { max_size_bytes } => {
                info!(max_size_bytes = ?max_size_bytes, "Using in-memory cache storage");
                match max_size_bytes {
                    Some(max) => Arc::new(MemoryCacheStorage::with_max_size(*max)),
                    None => Arc::new(MemoryCacheStorage::new()),
                }
            }
            StorageConfig::Disk { directory } => {
                info!(directory = %directory.display(), "Using disk cache storage");
                Arc::new(DiskCacheStorage::new(directory.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::AssetResponse;

    #[test]
    fn test_default_is_unbounded_memory() {
        assert_eq!(
            StorageConfig::default(),
            StorageConfig::Memory {
                max_size_bytes: None
            }
        );
        assert_eq!(StorageConfig::default().backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_open_disk_backend() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = StorageConfig::disk(temp.path());
        assert_eq!(config.backend_name(), "disk");

        let storage = config.open();
        let store = storage.open("v1").await.unwrap();
        store.put("k", AssetResponse::ok("x")).await.unwrap();
        assert!(temp.path().join("v1").is_dir());
    }
}
