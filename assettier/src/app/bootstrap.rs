//! Application bootstrap.

use std::sync::Arc;

use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::cache::CacheStorage;
use crate::capability::{classify_logged, DeviceSignals, TierDescriptor};
use crate::delivery::DeliveryPolicy;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::worker::{AssetWorker, StartReport};

/// A running asset-delivery application.
///
/// Brings components up in order:
/// 1. Classify the device once; the descriptor is fixed for the session
/// 2. Open the cache backend
/// 3. Build the worker over the backend and the network transport
/// 4. Install and activate the worker (only in [`start`](Self::start))
///
/// # Example
///
/// ```ignore
/// use assettier::app::{AppConfig, AssetApp};
/// use assettier::capability::DeviceSignals;
///
/// let app = AssetApp::start(AppConfig::default(), DeviceSignals::new(8192)).await?;
/// let url = app.policy().texture_url("rock");
/// let answer = app.worker().handle_fetch(&request).await;
/// ```
pub struct AssetApp {
    config: AppConfig,
    descriptor: TierDescriptor,
    policy: DeliveryPolicy,
    storage: Arc<dyn CacheStorage>,
    worker: AssetWorker,
    start_report: Option<StartReport>,
}

impl AssetApp {
    /// Build the application without installing the worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: AppConfig, signals: DeviceSignals) -> Result<Self, AppError> {
        let fetcher = ReqwestFetcher::with_timeout(config.timeout)?;
        Ok(Self::with_fetcher(config, signals, Arc::new(fetcher)))
    }

    /// Build the application over a caller-supplied transport.
    pub fn with_fetcher(
        config: AppConfig,
        signals: DeviceSignals,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        let descriptor = classify_logged(&signals);
        let policy = DeliveryPolicy::with_texture_root(descriptor, config.texture_root.clone());
        let storage = config.storage.open();

        let worker = AssetWorker::new(
            Arc::clone(&storage),
            fetcher,
            Arc::new(config.manifest.clone()),
            config.versions.clone(),
            config.origin.clone(),
        );

        Self {
            config,
            descriptor,
            policy,
            storage,
            worker,
            start_report: None,
        }
    }

    /// Build the application and start its worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the
    /// manifest cannot be fully populated.
    pub async fn start(config: AppConfig, signals: DeviceSignals) -> Result<Self, AppError> {
        let app = Self::new(config, signals)?;
        app.run().await
    }

    /// [`start`](Self::start) over a caller-supplied transport.
    pub async fn start_with_fetcher(
        config: AppConfig,
        signals: DeviceSignals,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, AppError> {
        Self::with_fetcher(config, signals, fetcher).run().await
    }

    async fn run(mut self) -> Result<Self, AppError> {
        info!(
            backend = self.config.storage.backend_name(),
            static_store = %self.config.versions.static_tag,
            texture_store = %self.config.versions.texture_tag,
            manifest_entries = self.config.manifest.len(),
            "Starting asset worker"
        );

        let report = self.worker.start().await?;
        info!(
            cached = report.install.entries,
            bytes = report.install.bytes,
            retired = report.activation.deleted.len(),
            "Asset worker active"
        );

        self.start_report = Some(report);
        Ok(self)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The device descriptor computed at startup.
    pub fn descriptor(&self) -> &TierDescriptor {
        &self.descriptor
    }

    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    pub fn worker(&self) -> &AssetWorker {
        &self.worker
    }

    pub fn storage(&self) -> Arc<dyn CacheStorage> {
        Arc::clone(&self.storage)
    }

    /// What the worker's start did, if it was started.
    pub fn start_report(&self) -> Option<&StartReport> {
        self.start_report.as_ref()
    }
}
