//! Application configuration for `AssetApp`.

use std::path::Path;
use std::time::Duration;

use reqwest::Url;

use super::error::AppError;
use crate::cache::{CacheVersions, StorageConfig};
use crate::config::{CacheBackend, ConfigFile};
use crate::manifest::Manifest;

/// Everything needed to bring up an [`AssetApp`](super::AssetApp).
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Cache backend.
    pub storage: StorageConfig,

    /// Store names.
    pub versions: CacheVersions,

    /// Static assets populated at install.
    pub manifest: Manifest,

    /// Origin the manifest and relative texture URLs resolve against.
    pub origin: Url,

    /// Path prefix of processed textures.
    pub texture_root: String,

    /// Transport timeout.
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}

impl AppConfig {
    /// Load from a config file, or from `~/.assettier/config.ini` when no
    /// path is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        Ok(Self::from_config_file(&file))
    }

    /// Translate a loaded `ConfigFile`.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let storage = match config.cache.backend {
            CacheBackend::Memory => StorageConfig::Memory {
                max_size_bytes: config.cache.memory_size,
            },
            CacheBackend::Disk => StorageConfig::disk(config.cache.directory.clone()),
        };

        Self {
            storage,
            versions: CacheVersions::new(
                config.cache.static_version.clone(),
                config.cache.texture_version.clone(),
            ),
            manifest: Manifest::new(&config.manifest.paths),
            origin: config.delivery.origin.clone(),
            texture_root: config.delivery.texture_root.clone(),
            timeout: Duration::from_secs(config.network.timeout_secs),
        }
    }

    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_static_version(mut self, tag: impl Into<String>) -> Self {
        self.versions.static_tag = tag.into();
        self
    }

    pub fn with_texture_version(mut self, tag: impl Into<String>) -> Self {
        self.versions.texture_tag = tag.into();
        self
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_texture_root(mut self, root: impl Into<String>) -> Self {
        self.texture_root = root.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
