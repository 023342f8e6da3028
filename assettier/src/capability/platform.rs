//! Mobile/tablet detection from a platform identifier string.

use std::sync::OnceLock;

use regex::Regex;

/// Case-insensitive pattern matching known mobile and tablet platforms.
///
/// Matches anywhere in the identifier, so a full user-agent string works:
/// `Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) ...`.
fn mobile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").unwrap()
    })
}

/// Whether the platform identifier names a mobile or tablet device.
pub fn is_mobile_platform(platform: &str) -> bool {
    mobile_pattern().is_match(platform)
}
