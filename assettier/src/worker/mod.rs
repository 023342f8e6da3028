//! The asset worker: one dispatcher for install, activate, fetch and
//! message events.
//!
//! # Lifecycle
//!
//! ```text
//! Installing ──install ok──► Installed ──activate──► Activating ──► Activated
//!      │
//!      └──install failed──► Redundant
//! ```
//!
//! [`AssetWorker::start`] runs install and then activates immediately, so a
//! new version takes over without waiting for old clients to go away.
//! Activation claims every client subscribed through
//! [`AssetWorker::subscribe`].

mod state;

pub use state::{ClientHandle, WorkerState};

use std::sync::Arc;

use reqwest::Url;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::{CacheStorage, CacheVersions};
use crate::fetch::{AssetRequest, Fetcher};
use crate::lifecycle::{
    ActivationReport, ControlMessage, InstallReport, LifecycleError, LifecycleManager,
    PrefetchBatch,
};
use crate::manifest::Manifest;
use crate::router::{CacheRouter, Interception};

/// Summary of a full start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub install: InstallReport,
    pub activation: ActivationReport,
}

/// Event dispatcher wiring the router and lifecycle manager to one set of
/// stores.
pub struct AssetWorker {
    router: CacheRouter,
    lifecycle: LifecycleManager,
    state_tx: watch::Sender<WorkerState>,
}

impl AssetWorker {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        manifest: Arc<Manifest>,
        versions: CacheVersions,
        origin: Url,
    ) -> Self {
        let router = CacheRouter::new(
            Arc::clone(&storage),
            Arc::clone(&fetcher),
            Arc::clone(&manifest),
            versions.clone(),
        );
        let lifecycle = LifecycleManager::new(storage, fetcher, manifest, versions, origin);
        let (state_tx, _) = watch::channel(WorkerState::Installing);

        Self {
            router,
            lifecycle,
            state_tx,
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.state_tx.borrow()
    }

    pub fn versions(&self) -> &CacheVersions {
        self.lifecycle.versions()
    }

    pub fn origin(&self) -> &Url {
        self.lifecycle.origin()
    }

    /// Register a client session.
    pub fn subscribe(&self) -> ClientHandle {
        ClientHandle::new(self.state_tx.subscribe())
    }

    fn transition(&self, state: WorkerState) {
        debug!(state = %state, "Worker state change");
        self.state_tx.send_replace(state);
    }

    /// Populate the static store. A failure leaves the worker redundant.
    pub async fn install(&self) -> Result<InstallReport, LifecycleError> {
        self.transition(WorkerState::Installing);
        match self.lifecycle.install().await {
            Ok(report) => {
                self.transition(WorkerState::Installed);
                Ok(report)
            }
            Err(e) => {
                self.transition(WorkerState::Redundant);
                Err(e)
            }
        }
    }

    /// Retire stale stores and claim all clients.
    ///
    /// Clients are claimed even when cleanup fails; the error is still
    /// returned.
    pub async fn activate(&self) -> Result<ActivationReport, LifecycleError> {
        self.transition(WorkerState::Activating);
        let result = self.lifecycle.activate().await;
        if let Err(e) = &result {
            warn!(error = %e, "Stale store cleanup failed");
        }
        self.transition(WorkerState::Activated);
        info!(
            clients = self.state_tx.receiver_count(),
            "Worker activated, clients claimed"
        );
        result
    }

    /// Install, then activate without waiting.
    pub async fn start(&self) -> Result<StartReport, LifecycleError> {
        let install = self.install().await?;
        let activation = self.activate().await?;
        Ok(StartReport {
            install,
            activation,
        })
    }

    /// Answer one intercepted request.
    pub async fn handle_fetch(&self, request: &AssetRequest) -> Interception {
        self.router.route(request).await
    }

    /// Handle a decoded control message.
    ///
    /// Unknown message types produce an empty batch.
    pub async fn handle_message(
        &self,
        message: ControlMessage,
    ) -> Result<PrefetchBatch, LifecycleError> {
        match message {
            ControlMessage::CacheTextures { textures } => {
                self.lifecycle.prefetch_textures(&textures).await
            }
            ControlMessage::Unknown => {
                debug!("Ignoring unknown control message");
                Ok(PrefetchBatch::default())
            }
        }
    }

    /// Handle a control message in its JSON form.
    ///
    /// Messages that do not decode are ignored.
    pub async fn handle_raw_message(&self, json: &str) -> Result<PrefetchBatch, LifecycleError> {
        match ControlMessage::from_json(json) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed control message");
                Ok(PrefetchBatch::default())
            }
        }
    }
}
