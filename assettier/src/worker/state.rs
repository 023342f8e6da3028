//! Worker lifecycle states and the client-side view of them.

use std::fmt;

use tokio::sync::watch;

/// Lifecycle state of an [`AssetWorker`](super::AssetWorker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Created, install not yet finished.
    Installing,
    /// Static store populated; waiting for activation.
    Installed,
    /// Retiring stale stores.
    Activating,
    /// Controlling every client.
    Activated,
    /// Install failed; this worker will never activate.
    Redundant,
}

impl WorkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        }
    }

    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Activated | WorkerState::Redundant)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client session observing the worker.
///
/// Cloneable; every clone sees the same state.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    state_rx: watch::Receiver<WorkerState>,
}

impl ClientHandle {
    pub(crate) fn new(state_rx: watch::Receiver<WorkerState>) -> Self {
        Self { state_rx }
    }

    pub fn state(&self) -> WorkerState {
        *self.state_rx.borrow()
    }

    /// Whether the worker has claimed this client.
    pub fn is_controlled(&self) -> bool {
        self.state() == WorkerState::Activated
    }

    /// Wait until the worker reaches a terminal state.
    ///
    /// Returns `true` if the client ended up controlled.
    pub async fn wait_for_control(&mut self) -> bool {
        loop {
            if self.state().is_terminal() {
                break;
            }
            if self.state_rx.changed().await.is_err() {
                // Worker dropped
                break;
            }
        }
        self.is_controlled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkerState::Activated.is_terminal());
        assert!(WorkerState::Redundant.is_terminal());
        assert!(!WorkerState::Installing.is_terminal());
        assert!(!WorkerState::Activating.is_terminal());
    }

    #[tokio::test]
    async fn test_client_observes_claim() {
        let (tx, rx) = watch::channel(WorkerState::Installing);
        let mut client = ClientHandle::new(rx);
        assert!(!client.is_controlled());

        let waiter = tokio::spawn(async move { client.wait_for_control().await });
        tx.send(WorkerState::Installed).unwrap();
        tx.send(WorkerState::Activated).unwrap();

        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_client_sees_dropped_worker() {
        let (tx, rx) = watch::channel(WorkerState::Installing);
        let mut client = ClientHandle::new(rx);
        drop(tx);
        assert!(!client.wait_for_control().await);
    }
}
