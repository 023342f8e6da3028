//! Raw capability signals and their sampling.
//!
//! Signals come from two places: the graphics context (maximum texture
//! size) and the platform (pixel ratio, memory, network, platform string).
//! Platform hints are individually optional; [`DeviceSignals::sample`]
//! applies the documented defaults so the classifier always sees a complete
//! tuple.

use super::platform::is_mobile_platform;
use super::tier::NetworkClass;

/// Memory hint assumed when the platform does not report one.
pub const DEFAULT_MEMORY_GB: u32 = 4;

/// Pixel ratio assumed when the platform does not report one.
pub const DEFAULT_PIXEL_RATIO: f64 = 1.0;

/// Network class assumed when no effective-type hint is available.
pub const DEFAULT_NETWORK: NetworkClass = NetworkClass::FourG;

/// Handle to a graphics context that can report its limits.
///
/// The rendering engine is an external collaborator; the classifier only
/// needs the maximum texture dimension.
pub trait GraphicsContext: Send + Sync {
    /// Maximum texture width/height in pixels.
    fn max_texture_size(&self) -> u32;
}

/// A graphics context with a fixed, pre-queried limit.
///
/// Used when the limit has already been read by the host (CLI flags,
/// configuration, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportedGraphicsContext {
    max_texture_size: u32,
}

impl ReportedGraphicsContext {
    pub fn new(max_texture_size: u32) -> Self {
        Self { max_texture_size }
    }
}

impl GraphicsContext for ReportedGraphicsContext {
    fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }
}

/// Optional platform-provided hints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformHints {
    /// Display density.
    pub pixel_ratio: Option<f64>,
    /// Hardware memory hint in GB.
    pub memory_gb: Option<u32>,
    /// Network effective type (`slow-2g`, `2g`, `3g`, `4g`).
    pub effective_type: Option<String>,
    /// Platform identifier, typically a user-agent string.
    pub platform: Option<String>,
}

impl PlatformHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = Some(ratio);
        self
    }

    pub fn with_memory_gb(mut self, gb: u32) -> Self {
        self.memory_gb = Some(gb);
        self
    }

    pub fn with_effective_type(mut self, effective_type: impl Into<String>) -> Self {
        self.effective_type = Some(effective_type.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// Complete signal tuple consumed by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSignals {
    pub max_texture_size: u32,
    pub pixel_ratio: f64,
    pub memory_gb: u32,
    pub network: NetworkClass,
    pub is_mobile: bool,
}

impl DeviceSignals {
    /// Signals for a desktop device with the given texture limit and every
    /// other signal at its default.
    pub fn new(max_texture_size: u32) -> Self {
        Self {
            max_texture_size,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            memory_gb: DEFAULT_MEMORY_GB,
            network: DEFAULT_NETWORK,
            is_mobile: false,
        }
    }

    /// Sample signals from a graphics context and platform hints.
    ///
    /// Missing, zero or non-finite hints fall back to their defaults:
    /// 4 GB memory, pixel ratio 1, network `4g`. A missing platform string
    /// counts as not mobile.
    pub fn sample(context: &dyn GraphicsContext, hints: &PlatformHints) -> Self {
        let pixel_ratio = hints
            .pixel_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_PIXEL_RATIO);

        let memory_gb = hints
            .memory_gb
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_MEMORY_GB);

        let network = hints
            .effective_type
            .as_deref()
            .map(NetworkClass::from_effective_type)
            .unwrap_or(DEFAULT_NETWORK);

        let is_mobile = hints
            .platform
            .as_deref()
            .map(is_mobile_platform)
            .unwrap_or(false);

        Self {
            max_texture_size: context.max_texture_size(),
            pixel_ratio,
            memory_gb,
            network,
            is_mobile,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn with_memory_gb(mut self, gb: u32) -> Self {
        self.memory_gb = gb;
        self
    }

    pub fn with_network(mut self, network: NetworkClass) -> Self {
        self.network = network;
        self
    }

    pub fn with_mobile(mut self, is_mobile: bool) -> Self {
        self.is_mobile = is_mobile;
        self
    }
}
