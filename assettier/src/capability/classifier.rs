//! Threshold classifier mapping device signals to a tier descriptor.
//!
//! # Cascade
//!
//! | Branch | Condition                                   | Tier   | Quality   | Target DPR |
//! |--------|---------------------------------------------|--------|-----------|------------|
//! | 1      | texture ≥ 16384, memory ≥ 16 GB, DPR ≥ 2    | ultra  | very-high | 2.0        |
//! | 2      | texture ≥ 8192, memory ≥ 4 GB               | high   | high-mid  | 1.5        |
//! | 3      | texture ≥ 4096                              | medium | medium    | 1.0        |
//! | 4      | otherwise                                   | low    | low       | 1.0        |
//!
//! The first matching branch wins. Two overrides run afterwards:
//!
//! 1. Mobile platforms are pinned to medium/medium at DPR 1.
//! 2. `2g` and `slow-2g` networks force quality to low; tier is unchanged.

use tracing::info;

use super::signals::{DeviceSignals, GraphicsContext, PlatformHints};
use super::tier::{Quality, TierDescriptor, TierName, TARGET_FPS};

const ULTRA_MIN_TEXTURE: u32 = 16384;
const ULTRA_MIN_MEMORY_GB: u32 = 16;
const ULTRA_MIN_PIXEL_RATIO: f64 = 2.0;

const HIGH_MIN_TEXTURE: u32 = 8192;
const HIGH_MIN_MEMORY_GB: u32 = 4;

const MEDIUM_MIN_TEXTURE: u32 = 4096;

/// Classify a complete signal tuple.
///
/// Pure and deterministic: the same signals always produce the same
/// descriptor.
pub fn classify(signals: &DeviceSignals) -> TierDescriptor {
    let (mut tier, mut quality, mut target_pixel_ratio) = base_tier(signals);

    if signals.is_mobile {
        tier = TierName::Medium;
        quality = Quality::Medium;
        target_pixel_ratio = 1.0;
    }

    if signals.network.is_very_slow() {
        quality = Quality::Low;
    }

    TierDescriptor {
        tier,
        quality,
        max_texture_size: signals.max_texture_size,
        pixel_ratio: signals.pixel_ratio,
        memory_gb: signals.memory_gb,
        network: signals.network,
        is_mobile: signals.is_mobile,
        target_fps: TARGET_FPS,
        target_pixel_ratio,
    }
}

/// Sample signals from the host and classify them, logging the result.
///
/// This is the once-per-session entry point. The returned descriptor is
/// immutable; later changes in the host's signals are not observed.
pub fn detect_tier(context: &dyn GraphicsContext, hints: &PlatformHints) -> TierDescriptor {
    classify_logged(&DeviceSignals::sample(context, hints))
}

/// [`classify`], then log the descriptor at `info`.
pub fn classify_logged(signals: &DeviceSignals) -> TierDescriptor {
    let descriptor = classify(signals);

    info!(
        tier = %descriptor.tier,
        quality = %descriptor.quality,
        max_texture_size = descriptor.max_texture_size,
        memory_gb = descriptor.memory_gb,
        pixel_ratio = descriptor.pixel_ratio,
        network = %descriptor.network,
        is_mobile = descriptor.is_mobile,
        "Device tier detected"
    );

    descriptor
}

fn base_tier(signals: &DeviceSignals) -> (TierName, Quality, f64) {
    if signals.max_texture_size >= ULTRA_MIN_TEXTURE
        && signals.memory_gb >= ULTRA_MIN_MEMORY_GB
        && signals.pixel_ratio >= ULTRA_MIN_PIXEL_RATIO
    {
        (TierName::Ultra, Quality::VeryHigh, 2.0)
    } else if signals.max_texture_size >= HIGH_MIN_TEXTURE
        && signals.memory_gb >= HIGH_MIN_MEMORY_GB
    {
        (TierName::High, Quality::HighMid, 1.5)
    } else if signals.max_texture_size >= MEDIUM_MIN_TEXTURE {
        (TierName::Medium, Quality::Medium, 1.0)
    } else {
        (TierName::Low, Quality::Low, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::signals::ReportedGraphicsContext;
    use crate::capability::tier::NetworkClass;
    use proptest::prelude::*;

    fn desktop(texture: u32, memory: u32, dpr: f64) -> DeviceSignals {
        DeviceSignals::new(texture)
            .with_memory_gb(memory)
            .with_pixel_ratio(dpr)
    }

    #[test]
    fn test_branch_boundaries() {
        let d = classify(&desktop(16384, 16, 2.0));
        assert_eq!(
            (d.tier, d.quality, d.target_pixel_ratio),
            (TierName::Ultra, Quality::VeryHigh, 2.0)
        );

        // Missing one ultra condition drops to high.
        let d = classify(&desktop(16384, 16, 1.5));
        assert_eq!(
            (d.tier, d.quality, d.target_pixel_ratio),
            (TierName::High, Quality::HighMid, 1.5)
        );

        let d = classify(&desktop(8192, 4, 1.0));
        assert_eq!((d.tier, d.quality), (TierName::High, Quality::HighMid));

        // Enough texture size but too little memory for high.
        let d = classify(&desktop(8192, 3, 1.0));
        assert_eq!(
            (d.tier, d.quality, d.target_pixel_ratio),
            (TierName::Medium, Quality::Medium, 1.0)
        );

        let d = classify(&desktop(4095, 64, 3.0));
        assert_eq!(
            (d.tier, d.quality, d.target_pixel_ratio),
            (TierName::Low, Quality::Low, 1.0)
        );
    }

    #[test]
    fn test_mobile_overrides_ultra() {
        let d = classify(&desktop(16384, 16, 2.0).with_mobile(true));
        assert_eq!(d.tier, TierName::Medium);
        assert_eq!(d.quality, Quality::Medium);
        assert_eq!(d.target_pixel_ratio, 1.0);
    }

    #[test]
    fn test_slow_network_keeps_tier() {
        let d = classify(&desktop(8192, 8, 1.0).with_network(NetworkClass::Slow2g));
        assert_eq!(d.tier, TierName::High);
        assert_eq!(d.quality, Quality::Low);
        assert_eq!(d.target_pixel_ratio, 1.5);
    }

    #[test]
    fn test_mobile_and_slow_network_combine() {
        let d = classify(
            &desktop(16384, 16, 3.0)
                .with_mobile(true)
                .with_network(NetworkClass::TwoG),
        );
        assert_eq!(d.tier, TierName::Medium);
        assert_eq!(d.quality, Quality::Low);
    }

    #[test]
    fn test_descriptor_carries_signals() {
        let signals = desktop(8192, 8, 1.25).with_network(NetworkClass::ThreeG);
        let d = classify(&signals);
        assert_eq!(d.max_texture_size, 8192);
        assert_eq!(d.memory_gb, 8);
        assert_eq!(d.pixel_ratio, 1.25);
        assert_eq!(d.network, NetworkClass::ThreeG);
        assert_eq!(d.target_fps, 60);
    }

    #[test]
    fn test_detect_tier_uses_defaults() {
        let ctx = ReportedGraphicsContext::new(8192);
        let d = detect_tier(&ctx, &PlatformHints::new());
        // 4 GB default memory is enough for the high branch.
        assert_eq!(d.tier, TierName::High);
        assert_eq!(d.network, NetworkClass::FourG);
    }

    fn network_strategy() -> impl Strategy<Value = NetworkClass> {
        prop_oneof![
            Just(NetworkClass::Slow2g),
            Just(NetworkClass::TwoG),
            Just(NetworkClass::ThreeG),
            Just(NetworkClass::FourG),
            Just(NetworkClass::Unknown),
        ]
    }

    fn signals_strategy() -> impl Strategy<Value = DeviceSignals> {
        (
            0u32..=32768,
            1u32..=64,
            0.5f64..4.0,
            network_strategy(),
            any::<bool>(),
        )
            .prop_map(|(texture, memory, dpr, network, mobile)| DeviceSignals {
                max_texture_size: texture,
                pixel_ratio: dpr,
                memory_gb: memory,
                network,
                is_mobile: mobile,
            })
    }

    fn quality_rank(q: Quality) -> u8 {
        match q {
            Quality::Low => 0,
            Quality::Medium => 1,
            Quality::HighMid | Quality::High => 2,
            Quality::VeryHigh => 3,
        }
    }

    proptest! {
        #[test]
        fn prop_ultra_branch(
            texture in 16384u32..=65536,
            memory in 16u32..=256,
            dpr in 2.0f64..8.0,
            network in prop_oneof![
                Just(NetworkClass::ThreeG),
                Just(NetworkClass::FourG),
                Just(NetworkClass::Unknown),
            ],
        ) {
            let d = classify(&desktop(texture, memory, dpr).with_network(network));
            prop_assert_eq!(d.tier, TierName::Ultra);
            prop_assert_eq!(d.quality, Quality::VeryHigh);
            prop_assert_eq!(d.target_pixel_ratio, 2.0);
        }

        #[test]
        fn prop_mobile_forces_medium(signals in signals_strategy()) {
            let d = classify(&signals.with_mobile(true));
            prop_assert_eq!(d.tier, TierName::Medium);
            prop_assert_eq!(d.target_pixel_ratio, 1.0);
            if !signals.network.is_very_slow() {
                prop_assert_eq!(d.quality, Quality::Medium);
            }
        }

        #[test]
        fn prop_slow_network_forces_low_quality_only(
            signals in signals_strategy(),
            slow in prop_oneof![Just(NetworkClass::Slow2g), Just(NetworkClass::TwoG)],
        ) {
            let fast = classify(&signals.with_network(NetworkClass::FourG));
            let d = classify(&signals.with_network(slow));
            prop_assert_eq!(d.quality, Quality::Low);
            prop_assert_eq!(d.tier, fast.tier);
            prop_assert_eq!(d.target_pixel_ratio, fast.target_pixel_ratio);
        }

        #[test]
        fn prop_desktop_overrides_never_raise_quality(signals in signals_strategy()) {
            let base = classify(&signals.with_mobile(false).with_network(NetworkClass::FourG));
            let d = classify(&signals.with_mobile(false));
            prop_assert!(quality_rank(d.quality) <= quality_rank(base.quality));
        }

        #[test]
        fn prop_target_fps_is_constant(signals in signals_strategy()) {
            prop_assert_eq!(classify(&signals).target_fps, 60);
        }
    }
}
