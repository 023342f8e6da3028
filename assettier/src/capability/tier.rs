//! Tier, quality and network classes plus the immutable tier descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Frame rate target shared by every tier.
pub const TARGET_FPS: u32 = 60;

/// Discrete capability class of the runtime device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Ultra,
    High,
    Medium,
    Low,
}

impl TierName {
    /// Label used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            TierName::Ultra => "ultra",
            TierName::High => "high",
            TierName::Medium => "medium",
            TierName::Low => "low",
        }
    }

    /// Parse a tier label. Returns `None` for unrecognised labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ultra" => Some(TierName::Ultra),
            "high" => Some(TierName::High),
            "medium" => Some(TierName::Medium),
            "low" => Some(TierName::Low),
            _ => None,
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset-fidelity class used to pick texture variants.
///
/// This is a separate enumeration from [`TierName`]: an `ultra` device
/// receives `very-high` assets and a `high` device receives `high-mid`
/// assets.
///
/// [`Quality::High`] is never produced by the classifier. It exists because
/// the texture extension rule keys on the literal label `high` (see
/// [`Quality::texture_extension`]), and variant directories named `high`
/// may still be requested by hosts that pin the quality explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    VeryHigh,
    High,
    HighMid,
    Medium,
    Low,
}

impl Quality {
    /// Label used in texture paths (`very-high`, `high-mid`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::VeryHigh => "very-high",
            Quality::High => "high",
            Quality::HighMid => "high-mid",
            Quality::Medium => "medium",
            Quality::Low => "low",
        }
    }

    /// File extension of the texture variant for this quality.
    ///
    /// Only the bare `high` label maps to `jpg`. `high-mid` and `very-high`
    /// are distinct labels and fall through to `webp` like every other
    /// quality. This mirrors how deployed asset trees are laid out today;
    /// whether `high-mid` should also receive `jpg` is unresolved, so the two
    /// are deliberately kept apart.
    pub fn texture_extension(&self) -> TextureExtension {
        match self {
            Quality::High => TextureExtension::Jpg,
            Quality::VeryHigh | Quality::HighMid | Quality::Medium | Quality::Low => {
                TextureExtension::Webp
            }
        }
    }

    /// Whether GPU-compressed KTX2 containers may be requested.
    pub fn allows_ktx2(&self) -> bool {
        !matches!(self, Quality::Low)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Texture file extensions served by the asset tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureExtension {
    Jpg,
    Webp,
}

impl TextureExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureExtension::Jpg => "jpg",
            TextureExtension::Webp => "webp",
        }
    }
}

/// Network effective-type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkClass {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
    #[serde(rename = "unknown")]
    Unknown,
}

impl NetworkClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkClass::Slow2g => "slow-2g",
            NetworkClass::TwoG => "2g",
            NetworkClass::ThreeG => "3g",
            NetworkClass::FourG => "4g",
            NetworkClass::Unknown => "unknown",
        }
    }

    /// Map an effective-type string to a class; anything unexpected is
    /// `Unknown`.
    pub fn from_effective_type(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => NetworkClass::Slow2g,
            "2g" => NetworkClass::TwoG,
            "3g" => NetworkClass::ThreeG,
            "4g" => NetworkClass::FourG,
            _ => NetworkClass::Unknown,
        }
    }

    /// True for the two classes that force low-quality assets.
    pub fn is_very_slow(&self) -> bool {
        matches!(self, NetworkClass::Slow2g | NetworkClass::TwoG)
    }
}

impl FromStr for NetworkClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_effective_type(s))
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable result of device classification.
///
/// Computed once per session by [`classify`](super::classify) and then
/// passed by value to every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierDescriptor {
    /// Capability class.
    pub tier: TierName,
    /// Asset-fidelity class.
    pub quality: Quality,
    /// Maximum texture dimension reported by the graphics context.
    pub max_texture_size: u32,
    /// Display density.
    pub pixel_ratio: f64,
    /// Memory hint in GB.
    pub memory_gb: u32,
    /// Network effective type.
    pub network: NetworkClass,
    /// Whether the platform identifier matched a mobile/tablet pattern.
    pub is_mobile: bool,
    /// Target frame rate.
    pub target_fps: u32,
    /// Render-resolution multiplier.
    pub target_pixel_ratio: f64,
}

impl fmt::Display for TierDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tier={} quality={} gpu={}px memory={}GB dpr={} network={} mobile={}",
            self.tier,
            self.quality,
            self.max_texture_size,
            self.memory_gb,
            self.pixel_ratio,
            self.network,
            self.is_mobile
        )
    }
}
