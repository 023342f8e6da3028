//! Host hardware probing for native (non-browser) runtimes.
//!
//! Browser hosts pass their hints in directly. A native host can use
//! [`host_hints`] to fill in the memory hint and platform identifier from
//! the operating system.

use super::signals::PlatformHints;

const GB: u64 = 1024 * 1024 * 1024;

/// Hints describing the current host.
///
/// Pixel ratio and network type are not observable from here and stay
/// unset, so the classifier falls back to their defaults.
pub fn host_hints() -> PlatformHints {
    PlatformHints {
        pixel_ratio: None,
        memory_gb: detect_memory_gb(),
        effective_type: None,
        platform: Some(std::env::consts::OS.to_string()),
    }
}

/// Detect total system memory in whole GB (rounded to nearest).
///
/// # Platform Support
///
/// - **Linux**: Parses `/proc/meminfo`
/// - **Other platforms**: Returns `None`
#[cfg(target_os = "linux")]
pub fn detect_memory_gb() -> Option<u32> {
    let content = std::fs::read_to_string("/proc/meminfo").ok()?;
    parse_meminfo_total(&content).map(bytes_to_gb)
}

#[cfg(not(target_os = "linux"))]
pub fn detect_memory_gb() -> Option<u32> {
    None
}

/// Extract `MemTotal` in bytes from `/proc/meminfo` content.
///
/// Format: `MemTotal:       16384000 kB`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo_total(content: &str) -> Option<u64> {
    content
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn bytes_to_gb(bytes: u64) -> u32 {
    let gb = (bytes + GB / 2) / GB;
    gb.clamp(1, u32::MAX as u64) as u32
}
