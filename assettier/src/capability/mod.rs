//! Device capability classification.
//!
//! Maps raw hardware and network signals to a discrete quality tier. The
//! classification runs once at startup; the resulting [`TierDescriptor`] is
//! an immutable value threaded through the application configuration
//! rather than looked up from global state.
//!
//! # Example
//!
//! ```
//! use assettier::capability::{detect_tier, PlatformHints, ReportedGraphicsContext, TierName};
//!
//! let gpu = ReportedGraphicsContext::new(16384);
//! let hints = PlatformHints::new()
//!     .with_pixel_ratio(2.0)
//!     .with_memory_gb(16)
//!     .with_effective_type("4g");
//!
//! let descriptor = detect_tier(&gpu, &hints);
//! assert_eq!(descriptor.tier, TierName::Ultra);
//! ```

mod classifier;
mod hardware;
mod platform;
mod signals;
mod tier;

pub use classifier::{classify, classify_logged, detect_tier};
pub use hardware::{detect_memory_gb, host_hints};
pub use platform::is_mobile_platform;
pub use signals::{
    DeviceSignals, GraphicsContext, PlatformHints, ReportedGraphicsContext, DEFAULT_MEMORY_GB,
    DEFAULT_NETWORK, DEFAULT_PIXEL_RATIO,
};
pub use tier::{NetworkClass, Quality, TextureExtension, TierDescriptor, TierName, TARGET_FPS};
