//! Delivery parameters derived from a tier descriptor.

use crate::capability::{Quality, TierDescriptor, TierName};

/// Root of the processed texture tree, relative to the asset origin.
pub const DEFAULT_TEXTURE_ROOT: &str = "textures/processed";

/// Concurrency ceiling used when a tier label is not recognised.
pub const DEFAULT_MAX_CONCURRENT_LOADS: usize = 2;

/// Concurrency ceiling for a tier.
///
/// | Tier   | Concurrent loads |
/// |--------|------------------|
/// | ultra  | 6                |
/// | high   | 4                |
/// | medium | 2                |
/// | low    | 1                |
pub fn max_concurrent_loads(tier: TierName) -> usize {
    match tier {
        TierName::Ultra => 6,
        TierName::High => 4,
        TierName::Medium => 2,
        TierName::Low => 1,
    }
}

/// Concurrency ceiling looked up by tier label, for hosts that carry the
/// tier as a string. Unknown labels get [`DEFAULT_MAX_CONCURRENT_LOADS`].
pub fn max_concurrent_loads_for_label(label: &str) -> usize {
    TierName::from_label(label)
        .map(max_concurrent_loads)
        .unwrap_or(DEFAULT_MAX_CONCURRENT_LOADS)
}

/// Answers the asset loader's questions for one session.
///
/// Holds nothing but the descriptor and the texture root, so every answer is
/// reproducible without a live graphics context.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPolicy {
    descriptor: TierDescriptor,
    texture_root: String,
}

impl DeliveryPolicy {
    /// Create a policy using [`DEFAULT_TEXTURE_ROOT`].
    pub fn new(descriptor: TierDescriptor) -> Self {
        Self::with_texture_root(descriptor, DEFAULT_TEXTURE_ROOT)
    }

    /// Create a policy rooted at a custom texture directory.
    ///
    /// Trailing slashes on the root are ignored.
    pub fn with_texture_root(descriptor: TierDescriptor, texture_root: impl Into<String>) -> Self {
        let texture_root = texture_root.into().trim_end_matches('/').to_string();
        Self {
            descriptor,
            texture_root,
        }
    }

    pub fn descriptor(&self) -> &TierDescriptor {
        &self.descriptor
    }

    pub fn quality(&self) -> Quality {
        self.descriptor.quality
    }

    /// Current quality label, e.g. `high-mid`.
    pub fn quality_level(&self) -> &'static str {
        self.descriptor.quality.as_str()
    }

    /// URL of the texture variant for `basename` at the current quality.
    ///
    /// `{root}/{quality}/{basename}.{ext}`, where `ext` follows
    /// [`Quality::texture_extension`].
    pub fn texture_url(&self, basename: &str) -> String {
        let quality = self.descriptor.quality;
        format!(
            "{}/{}/{}.{}",
            self.texture_root,
            quality.as_str(),
            basename,
            quality.texture_extension().as_str()
        )
    }

    /// Whether KTX2 GPU-compressed textures should be requested.
    pub fn should_use_ktx2(&self) -> bool {
        self.descriptor.quality.allows_ktx2()
    }

    /// How many asset loads may run at once.
    pub fn max_concurrent_loads(&self) -> usize {
        max_concurrent_loads(self.descriptor.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{classify, DeviceSignals, NetworkClass};

    fn descriptor_with(tier: TierName, quality: Quality) -> TierDescriptor {
        let mut d = classify(&DeviceSignals::new(8192));
        d.tier = tier;
        d.quality = quality;
        d
    }

    #[test]
    fn test_texture_url_high_uses_jpg() {
        let policy = DeliveryPolicy::new(descriptor_with(TierName::High, Quality::High));
        assert_eq!(policy.texture_url("rock"), "textures/processed/high/rock.jpg");
    }

    #[test]
    fn test_texture_url_medium_uses_webp() {
        let policy = DeliveryPolicy::new(descriptor_with(TierName::Medium, Quality::Medium));
        assert_eq!(policy.texture_url("rock"), "textures/processed/medium/rock.webp");
    }

    #[test]
    fn test_texture_url_high_mid_is_not_high() {
        let policy = DeliveryPolicy::new(descriptor_with(TierName::High, Quality::HighMid));
        assert_eq!(
            policy.texture_url("rock"),
            "textures/processed/high-mid/rock.webp"
        );

        let policy = DeliveryPolicy::new(descriptor_with(TierName::Ultra, Quality::VeryHigh));
        assert!(policy.texture_url("rock").ends_with("very-high/rock.webp"));
    }

    #[test]
    fn test_custom_texture_root() {
        let policy = DeliveryPolicy::with_texture_root(
            descriptor_with(TierName::Low, Quality::Low),
            "/cdn/tex/",
        );
        assert_eq!(policy.texture_url("sand"), "/cdn/tex/low/sand.webp");
    }

    #[test]
    fn test_should_use_ktx2_false_only_for_low() {
        for quality in [
            Quality::VeryHigh,
            Quality::High,
            Quality::HighMid,
            Quality::Medium,
        ] {
            let policy = DeliveryPolicy::new(descriptor_with(TierName::High, quality));
            assert!(policy.should_use_ktx2(), "{} should allow KTX2", quality);
        }

        let policy = DeliveryPolicy::new(descriptor_with(TierName::High, Quality::Low));
        assert!(!policy.should_use_ktx2());
    }

    #[test]
    fn test_concurrency_table() {
        assert_eq!(max_concurrent_loads(TierName::Ultra), 6);
        assert_eq!(max_concurrent_loads(TierName::High), 4);
        assert_eq!(max_concurrent_loads(TierName::Medium), 2);
        assert_eq!(max_concurrent_loads(TierName::Low), 1);
    }

    #[test]
    fn test_concurrency_by_label_defaults_to_two() {
        assert_eq!(max_concurrent_loads_for_label("ultra"), 6);
        assert_eq!(max_concurrent_loads_for_label("low"), 1);
        assert_eq!(max_concurrent_loads_for_label("potato"), 2);
        assert_eq!(max_concurrent_loads_for_label(""), 2);
    }

    #[test]
    fn test_policy_from_classified_descriptor() {
        let descriptor = classify(
            &DeviceSignals::new(8192)
                .with_memory_gb(8)
                .with_network(NetworkClass::Slow2g),
        );
        let policy = DeliveryPolicy::new(descriptor);

        assert_eq!(policy.quality_level(), "low");
        assert!(!policy.should_use_ktx2());
        // Tier stays high on slow networks, so the concurrency ceiling does too.
        assert_eq!(policy.max_concurrent_loads(), 4);
    }
}
