//! On-disk cache storage.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── valor-3d-v2-optimized/
//! │   ├── 3f2a...c1.entry
//! │   └── 9b07...4e.entry
//! └── valor-textures-v2/
//!     └── ...
//! ```
//!
//! Each store is a directory named after the store (percent-encoded where
//! needed). Each entry file is named by the SHA-256 of its request key and
//! holds a bincode-encoded [`CachedResponse`]. Writes go to a temporary
//! file first and are renamed into place, so readers never see a partial
//! entry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::cache::traits::{BoxFuture, CacheError, CacheStorage, CacheStore, CachedResponse};
use crate::fetch::AssetResponse;

const ENTRY_EXTENSION: &str = "entry";
const TEMP_EXTENSION: &str = "tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Encode a store name as a directory name.
///
/// ASCII alphanumerics, `-`, `_` and `.` pass through; every other byte
/// becomes `%XX`. Empty names and the `.`/`..` path components are rejected.
fn encode_store_name(name: &str) -> Result<String, CacheError> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(CacheError::InvalidName(name.to_string()));
    }

    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    Ok(encoded)
}

/// Reverse [`encode_store_name`]. Returns `None` for malformed names.
fn decode_store_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

fn entry_file_name(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}.{}", digest, ENTRY_EXTENSION)
}

/// One named on-disk store.
pub struct DiskCacheStore {
    name: String,
    directory: PathBuf,
}

impl DiskCacheStore {
    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(entry_file_name(key))
    }

    async fn read_entry(path: &Path) -> Result<Option<CachedResponse>, CacheError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    async fn get_inner(&self, key: &str) -> Result<Option<AssetResponse>, CacheError> {
        let entry = Self::read_entry(&self.entry_path(key)).await?;
        // Guard against a hash collision handing back someone else's entry.
        Ok(entry
            .filter(|e| e.key == key)
            .map(CachedResponse::into_response))
    }

    async fn put_inner(&self, key: &str, response: AssetResponse) -> Result<(), CacheError> {
        let entry = CachedResponse::from_response(key, &response);
        let bytes =
            bincode::serialize(&entry).map_err(|e| CacheError::Serialization(e.to_string()))?;

        // The store directory may have been removed by a concurrent delete.
        tokio::fs::create_dir_all(&self.directory).await?;

        let final_path = self.entry_path(key);
        let temp_path = final_path.with_extension(format!(
            "{}.{}.{}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed),
            TEMP_EXTENSION
        ));

        tokio::fs::write(&temp_path, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &final_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(store = %self.name, key = key, bytes = bytes.len(), "Entry written");
        Ok(())
    }

    async fn delete_inner(&self, key: &str) -> Result<bool, CacheError> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys_inner(&self) -> Result<Vec<String>, CacheError> {
        let mut dir = match tokio::fs::read_dir(&self.directory).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            match Self::read_entry(&path).await {
                Ok(Some(entry)) => keys.push(entry.key),
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable cache entry");
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl CacheStore for DiskCacheStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<AssetResponse>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { self.get_inner(&key).await })
    }

    fn put(&self, key: &str, response: AssetResponse) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move { self.put_inner(&key, response).await })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { self.delete_inner(&key).await })
    }

    fn keys(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>> {
        Box::pin(self.keys_inner())
    }
}

/// Directory-backed registry of named stores.
///
/// Store names are listed in lexical order.
pub struct DiskCacheStorage {
    root: PathBuf,
}

impl DiskCacheStorage {
    /// Create a storage rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store_directory(&self, name: &str) -> Result<PathBuf, CacheError> {
        Ok(self.root.join(encode_store_name(name)?))
    }

    async fn open_inner(&self, name: &str) -> Result<Arc<dyn CacheStore>, CacheError> {
        let directory = self.store_directory(name)?;
        tokio::fs::create_dir_all(&directory).await?;
        Ok(Arc::new(DiskCacheStore {
            name: name.to_string(),
            directory,
        }))
    }

    async fn get_store_inner(
        &self,
        name: &str,
    ) -> Result<Option<Arc<dyn CacheStore>>, CacheError> {
        let directory = self.store_directory(name)?;
        match tokio::fs::metadata(&directory).await {
            Ok(m) if m.is_dir() => Ok(Some(Arc::new(DiskCacheStore {
                name: name.to_string(),
                directory,
            }))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_inner(&self, name: &str) -> Result<bool, CacheError> {
        let directory = self.store_directory(name)?;
        match tokio::fs::remove_dir_all(&directory).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn names_inner(&self) -> Result<Vec<String>, CacheError> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            if !item.file_type().await?.is_dir() {
                continue;
            }
            let file_name = item.file_name();
            match file_name.to_str().and_then(decode_store_name) {
                Some(name) => names.push(name),
                None => {
                    warn!(path = %item.path().display(), "Ignoring unrecognised cache directory")
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl CacheStorage for DiskCacheStorage {
    fn open(&self, name: &str) -> BoxFuture<'_, Result<Arc<dyn CacheStore>, CacheError>> {
        let name = name.to_string();
        Box::pin(async move { self.open_inner(&name).await })
    }

    fn get_store(
        &self,
        name: &str,
    ) -> BoxFuture<'_, Result<Option<Arc<dyn CacheStore>>, CacheError>> {
        let name = name.to_string();
        Box::pin(async move { self.get_store_inner(&name).await })
    }

    fn has(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let name = name.to_string();
        Box::pin(async move {
            let directory = self.store_directory(&name)?;
            Ok(tokio::fs::metadata(&directory)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let name = name.to_string();
        Box::pin(async move { self.delete_inner(&name).await })
    }

    fn names(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>> {
        Box::pin(self.names_inner())
    }
}
