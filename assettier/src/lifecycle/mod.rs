//! Cache lifecycle: versioned install, activation cleanup and background
//! texture pre-fetch.
//!
//! Two stores are named by version tags. Install fills the static store
//! from the manifest, all-or-nothing. Activation deletes every store whose
//! name is not a current tag, so bumping the static tag retires the old
//! app shell while cached textures survive under their own tag.

mod error;
mod manager;
mod message;
mod prefetch;

pub use error::LifecycleError;
pub use manager::{ActivationReport, InstallReport, LifecycleManager};
pub use message::ControlMessage;
pub use prefetch::{PrefetchBatch, PrefetchOutcome, PrefetchReport};
