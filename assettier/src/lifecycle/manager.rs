//! Install and activate steps, and texture pre-fetch dispatch.

use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::Url;
use tracing::{debug, info, warn};

use super::error::LifecycleError;
use super::prefetch::{spawn_prefetch, PrefetchBatch};
use crate::cache::{CacheStorage, CacheVersions};
use crate::fetch::{AssetRequest, AssetResponse, Fetcher};
use crate::manifest::Manifest;

/// What an install wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub store: String,
    pub entries: usize,
    pub bytes: usize,
}

/// What an activation removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationReport {
    /// Stores deleted because their tag is no longer current.
    pub deleted: Vec<String>,
}

/// Owns the versioned stores: populates the static store at install,
/// retires stale stores at activation, and fills the texture store on
/// request.
#[derive(Clone)]
pub struct LifecycleManager {
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    manifest: Arc<Manifest>,
    versions: CacheVersions,
    origin: Url,
}

impl LifecycleManager {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        manifest: Arc<Manifest>,
        versions: CacheVersions,
        origin: Url,
    ) -> Self {
        Self {
            storage,
            fetcher,
            manifest,
            versions,
            origin,
        }
    }

    pub fn versions(&self) -> &CacheVersions {
        &self.versions
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Populate the static store from the manifest.
    ///
    /// All entries are fetched concurrently. If any fetch fails or returns a
    /// non-2xx status the whole step fails and nothing is written.
    pub async fn install(&self) -> Result<InstallReport, LifecycleError> {
        let store_name = self.versions.static_tag.clone();
        let requests = self.manifest.requests(&self.origin)?;

        info!(
            store = %store_name,
            entries = requests.len(),
            origin = %self.origin,
            "Populating static store from manifest"
        );

        let fetches = requests.iter().map(|request| {
            let store_name = store_name.as_str();
            async move {
                let response = self.fetcher.fetch(request).await.map_err(|e| {
                    LifecycleError::ManifestPopulation {
                        store: store_name.to_string(),
                        url: request.to_string(),
                        reason: e.to_string(),
                    }
                })?;

                if !response.is_success() {
                    return Err(LifecycleError::ManifestPopulation {
                        store: store_name.to_string(),
                        url: request.to_string(),
                        reason: format!("HTTP {}", response.status()),
                    });
                }
                Ok::<(&AssetRequest, AssetResponse), LifecycleError>((request, response))
            }
        });

        let fetched = match try_join_all(fetches).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(store = %store_name, error = %e, "Manifest population failed");
                return Err(e);
            }
        };

        let store = self.storage.open(&store_name).await?;
        let mut bytes = 0;
        for (request, response) in &fetched {
            bytes += response.len();
            store.put(request.cache_key(), response.clone()).await?;
        }

        info!(store = %store_name, entries = fetched.len(), bytes, "Static store populated");

        Ok(InstallReport {
            store: store_name,
            entries: fetched.len(),
            bytes,
        })
    }

    /// Delete every store whose name is neither current tag.
    pub async fn activate(&self) -> Result<ActivationReport, LifecycleError> {
        let mut report = ActivationReport::default();

        for name in self.storage.names().await? {
            if self.versions.is_current(&name) {
                continue;
            }
            info!(store = %name, "Deleting stale cache store");
            if self.storage.delete(&name).await? {
                report.deleted.push(name);
            }
        }

        Ok(report)
    }

    /// Start pre-fetching textures into the texture store.
    ///
    /// Relative URLs are resolved against the origin. URLs that cannot be
    /// parsed are logged and counted as failures in the batch report.
    pub async fn prefetch_textures(
        &self,
        urls: &[String],
    ) -> Result<PrefetchBatch, LifecycleError> {
        if urls.is_empty() {
            debug!("No textures to pre-fetch");
            return Ok(PrefetchBatch::default());
        }

        let mut requests = Vec::with_capacity(urls.len());
        let mut rejected = 0;
        for url in urls {
            match AssetRequest::resolve(&self.origin, url) {
                Ok(request) => requests.push(request),
                Err(e) => {
                    warn!(url = %url, error = %e, "Skipping texture with invalid URL");
                    rejected += 1;
                }
            }
        }

        let store = self.storage.open(&self.versions.texture_tag).await?;
        Ok(spawn_prefetch(
            Arc::clone(&self.fetcher),
            store,
            requests,
            rejected,
        ))
    }
}
