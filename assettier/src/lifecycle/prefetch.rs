//! Background texture pre-fetching.
//!
//! Each URL gets its own task. A slow or failing fetch never blocks the
//! others, and dropping the returned [`PrefetchBatch`] detaches the tasks
//! rather than cancelling them.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::fetch::{AssetRequest, Fetcher};

/// Outcome of pre-fetching one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchOutcome {
    /// Fetched with status 200 and written to the texture store.
    Stored,
    /// Fetched, but the status was not 200.
    Skipped(u16),
    /// The fetch or the store write failed.
    Failed(String),
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PrefetchReport {
    pub fn total(&self) -> usize {
        self.stored + self.skipped + self.failed
    }

    fn record(&mut self, outcome: &PrefetchOutcome) {
        match outcome {
            PrefetchOutcome::Stored => self.stored += 1,
            PrefetchOutcome::Skipped(_) => self.skipped += 1,
            PrefetchOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Handle to a set of running pre-fetch tasks.
#[derive(Debug, Default)]
pub struct PrefetchBatch {
    handles: Vec<JoinHandle<PrefetchOutcome>>,
    rejected: usize,
}

impl PrefetchBatch {
    /// Number of tasks spawned.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every task and summarise the outcomes.
    ///
    /// URLs that could not be parsed count as failures.
    pub async fn join(self) -> PrefetchReport {
        let mut report = PrefetchReport {
            failed: self.rejected,
            ..Default::default()
        };
        for handle in self.handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => PrefetchOutcome::Failed(e.to_string()),
            };
            report.record(&outcome);
        }
        report
    }
}

/// Spawn one fetch-and-store task per request.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_prefetch(
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn CacheStore>,
    requests: Vec<AssetRequest>,
    rejected: usize,
) -> PrefetchBatch {
    info!(
        store = store.name(),
        count = requests.len(),
        "Pre-fetching textures"
    );

    let handles = requests
        .into_iter()
        .map(|request| {
            let fetcher = Arc::clone(&fetcher);
            let store = Arc::clone(&store);
            tokio::spawn(async move { prefetch_one(fetcher.as_ref(), store.as_ref(), &request).await })
        })
        .collect();

    PrefetchBatch { handles, rejected }
}

async fn prefetch_one(
    fetcher: &dyn Fetcher,
    store: &dyn CacheStore,
    request: &AssetRequest,
) -> PrefetchOutcome {
    let response = match fetcher.fetch(request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %request, error = %e, "Background texture fetch failed");
            return PrefetchOutcome::Failed(e.to_string());
        }
    };

    if response.status() != 200 {
        debug!(url = %request, status = response.status(), "Not caching texture");
        return PrefetchOutcome::Skipped(response.status());
    }

    match store.put(request.cache_key(), response).await {
        Ok(()) => {
            debug!(url = %request, "Background cached texture");
            PrefetchOutcome::Stored
        }
        Err(e) => {
            warn!(url = %request, error = %e, "Failed to store pre-fetched texture");
            PrefetchOutcome::Failed(e.to_string())
        }
    }
}
