//! Byte sizes written as `512MB`, `2GB` and the like.

use thiserror::Error;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid size '{input}' - expected a whole number with an optional KB, MB or GB suffix")]
pub struct SizeParseError {
    input: String,
}

/// Parse a size into bytes.
///
/// Accepts a bare byte count or a `K`/`KB`, `M`/`MB`, `G`/`GB` suffix
/// (binary multiples), case-insensitively, with optional whitespace before
/// the suffix.
///
/// ```
/// use assettier::config::parse_size;
///
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// assert_eq!(parse_size("512MB").unwrap(), 512 * 1024 * 1024);
/// assert_eq!(parse_size("2 gb").unwrap(), 2 * 1024 * 1024 * 1024);
/// ```
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let err = || SizeParseError {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();
    let digits_end = upper
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(upper.len());
    if digits_end == 0 {
        return Err(err());
    }

    let multiplier = match upper[digits_end..].trim_start() {
        "" => 1,
        "K" | "KB" => KB,
        "M" | "MB" => MB,
        "G" | "GB" => GB,
        _ => return Err(err()),
    };

    let value: u64 = upper[..digits_end].parse().map_err(|_| err())?;
    value.checked_mul(multiplier).ok_or_else(err)
}

/// Render a byte count with the largest unit that divides it exactly.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB && bytes % GB == 0 {
        format!("{}GB", bytes / GB)
    } else if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        bytes.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("1k").unwrap(), 1024);
        assert_eq!(parse_size("64KB").unwrap(), 64 * 1024);
        assert_eq!(parse_size("512M").unwrap(), 512 * MB);
        assert_eq!(parse_size("  3 GB ").unwrap(), 3 * GB);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "MB", "-1GB", "1.5GB", "2TB", "12 34"] {
            assert!(parse_size(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert!(parse_size("99999999999999GB").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512 * MB), "512MB");
        assert_eq!(format_size(2 * GB), "2GB");
        assert_eq!(format_size(1536), "1536");
        assert_eq!(format_size(3 * KB), "3KB");
    }
}
