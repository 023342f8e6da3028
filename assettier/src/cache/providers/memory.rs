//! In-memory cache storage using moka.
//!
//! Each named store wraps a `moka::future::Cache`, which gives lock-free
//! reads and concurrent writes without explicit locking. The registry of
//! stores is a small ordered list behind a `parking_lot::RwLock`; it is only
//! written when a store is created or deleted.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use parking_lot::RwLock;

use crate::cache::traits::{BoxFuture, CacheError, CacheStorage, CacheStore};
use crate::fetch::AssetResponse;

/// One named in-memory store.
pub struct MemoryCacheStore {
    name: String,
    cache: MokaCache<String, AssetResponse>,
}

impl MemoryCacheStore {
    /// Create a store.
    ///
    /// # Arguments
    ///
    /// * `name` - Store name
    /// * `max_size_bytes` - Optional bound on total body bytes; moka evicts
    ///   least-recently-used entries beyond it
    pub fn new(name: impl Into<String>, max_size_bytes: Option<u64>) -> Self {
        let mut builder = MokaCache::builder();

        if let Some(max) = max_size_bytes {
            builder = builder
                // Weight each entry by its body size
                .weigher(|_key: &String, value: &AssetResponse| -> u32 {
                    value.len().min(u32::MAX as usize) as u32
                })
                .max_capacity(max);
        }

        Self {
            name: name.into(),
            cache: builder.build(),
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<AssetResponse>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await) })
    }

    fn put(&self, key: &str, response: AssetResponse) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, response).await;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.remove(&key).await.is_some()) })
    }

    fn keys(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>> {
        Box::pin(async move {
            Ok(self
                .cache
                .iter()
                .map(|(key, _)| key.as_ref().clone())
                .collect())
        })
    }
}

/// In-memory registry of named stores.
///
/// An optional byte bound applies to each store on its own, so a full
/// texture store never evicts app-shell entries. Store names are kept in creation order, which is the order
/// [`CacheStorage::match_any`] searches them.
#[derive(Default)]
pub struct MemoryCacheStorage {
    stores: RwLock<Vec<Arc<MemoryCacheStore>>>,
    max_size_bytes: Option<u64>,
}

impl MemoryCacheStorage {
    /// Create an unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage whose stores are each bounded to `max_size_bytes`.
    pub fn with_max_size(max_size_bytes: u64) -> Self {
        Self {
            stores: RwLock::new(Vec::new()),
            max_size_bytes: Some(max_size_bytes),
        }
    }

    fn find(&self, name: &str) -> Option<Arc<MemoryCacheStore>> {
        self.stores.read().iter().find(|s| s.name == name).cloned()
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn open(&self, name: &str) -> BoxFuture<'_, Result<Arc<dyn CacheStore>, CacheError>> {
        let name = name.to_string();
        Box::pin(async move {
            if let Some(store) = self.find(&name) {
                return Ok(store as Arc<dyn CacheStore>);
            }

            let mut stores = self.stores.write();
            // Another task may have created it between the read and write locks.
            if let Some(store) = stores.iter().find(|s| s.name == name) {
                return Ok(Arc::clone(store) as Arc<dyn CacheStore>);
            }
            let store = Arc::new(MemoryCacheStore::new(name, self.max_size_bytes));
            stores.push(Arc::clone(&store));
            Ok(store as Arc<dyn CacheStore>)
        })
    }

    fn get_store(
        &self,
        name: &str,
    ) -> BoxFuture<'_, Result<Option<Arc<dyn CacheStore>>, CacheError>> {
        let name = name.to_string();
        Box::pin(async move { Ok(self.find(&name).map(|s| s as Arc<dyn CacheStore>)) })
    }

    fn has(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let name = name.to_string();
        Box::pin(async move { Ok(self.find(&name).is_some()) })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut stores = self.stores.write();
            let before = stores.len();
            stores.retain(|s| s.name != name);
            Ok(stores.len() != before)
        })
    }

    fn names(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>> {
        Box::pin(async move { Ok(self.stores.read().iter().map(|s| s.name.clone()).collect()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_store_put_and_get() {
        let store = MemoryCacheStore::new("static", None);

        store
            .put("http://a/index.html", AssetResponse::ok("<html>"))
            .await
            .unwrap();

        let hit = store.get("http://a/index.html").await.unwrap();
        assert_eq!(hit, Some(AssetResponse::ok("<html>")));
        assert!(store.get("http://a/other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_replace_and_delete() {
        let store = MemoryCacheStore::new("static", None);

        store.put("k", AssetResponse::ok("one")).await.unwrap();
        store.put("k", AssetResponse::ok("two")).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(AssetResponse::ok("two")));
        assert_eq!(store.len().await.unwrap(), 1);

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bounded_store_evicts() {
        let store = MemoryCacheStore::new("textures", Some(2500));

        for i in 0..3 {
            store
                .put(&format!("k{}", i), AssetResponse::ok(vec![0u8; 1000]))
                .await
                .unwrap();
        }

        store.cache.run_pending_tasks().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.cache.run_pending_tasks().await;

        assert!(store.cache.weighted_size() <= 2500);
    }

    #[tokio::test]
    async fn test_bound_applies_per_store() {
        let storage = MemoryCacheStorage::with_max_size(2500);
        let shell = storage.open("static").await.unwrap();
        let textures = storage.open("textures").await.unwrap();

        shell.put("index", AssetResponse::ok(vec![0u8; 2000])).await.unwrap();
        for i in 0..5 {
            textures
                .put(&format!("t{}", i), AssetResponse::ok(vec![0u8; 1000]))
                .await
                .unwrap();
        }

        let textures = storage.find("textures").unwrap();
        textures.cache.run_pending_tasks().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        textures.cache.run_pending_tasks().await;

        assert!(textures.cache.weighted_size() <= 2500);
        assert!(shell.get("index").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_storage_open_is_idempotent() {
        let storage = MemoryCacheStorage::new();

        let a = storage.open("v1").await.unwrap();
        a.put("k", AssetResponse::ok("x")).await.unwrap();

        let b = storage.open("v1").await.unwrap();
        assert_eq!(b.get("k").await.unwrap(), Some(AssetResponse::ok("x")));
        assert_eq!(storage.names().await.unwrap(), vec!["v1".to_string()]);
    }

    #[tokio::test]
    async fn test_storage_names_in_creation_order() {
        let storage = MemoryCacheStorage::new();
        storage.open("b").await.unwrap();
        storage.open("a").await.unwrap();
        storage.open("c").await.unwrap();

        assert_eq!(storage.names().await.unwrap(), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_storage_delete() {
        let storage = MemoryCacheStorage::new();
        storage.open("old").await.unwrap();

        assert!(storage.has("old").await.unwrap());
        assert!(storage.delete("old").await.unwrap());
        assert!(!storage.has("old").await.unwrap());
        assert!(!storage.delete("old").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_store_and_match_any_do_not_create() {
        let storage = MemoryCacheStorage::new();

        assert!(storage.get_store("v1").await.unwrap().is_none());
        assert!(storage.match_any("k").await.unwrap().is_none());
        assert!(storage.names().await.unwrap().is_empty());

        storage.open("v1").await.unwrap();
        assert!(storage.get_store("v1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_storage_match_any_searches_all_stores() {
        let storage = MemoryCacheStorage::new();
        storage.open("first").await.unwrap();
        let second = storage.open("second").await.unwrap();
        second.put("k", AssetResponse::ok("found")).await.unwrap();

        let hit = storage.match_any("k").await.unwrap();
        assert_eq!(hit, Some(AssetResponse::ok("found")));
        assert!(storage.match_any("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_puts() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let mut handles = Vec::new();

        for i in 0..50 {
            let storage = Arc::clone(&storage);
            handles.push(tokio::spawn(async move {
                let store = storage.open("shared").await.unwrap();
                let key = format!("key{}", i);
                store.put(&key, AssetResponse::ok(vec![i as u8; 10])).await.unwrap();
                assert!(store.get(&key).await.unwrap().is_some());
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let store = storage.open("shared").await.unwrap();
        assert_eq!(store.len().await.unwrap(), 50);
        assert_eq!(storage.names().await.unwrap().len(), 1);
    }
}
