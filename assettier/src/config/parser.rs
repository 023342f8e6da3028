//! INI parsing: the single place where key names map to struct fields.

use std::path::PathBuf;

use ini::Ini;
use reqwest::Url;

use super::file::{CacheBackend, ConfigError, ConfigFile};
use super::size::parse_size;

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Non-blank, trimmed value of a key.
fn value<'a>(section: &'a ini::Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an `Ini` into a `ConfigFile`, overlaying found values on the
/// defaults. Unknown sections and keys are ignored.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigError> {
    let mut config = ConfigFile::default();

    // [cache]
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = value(section, "backend") {
            config.cache.backend = v
                .parse::<CacheBackend>()
                .map_err(|_| invalid("cache", "backend", v, "must be 'memory' or 'disk'"))?;
        }
        if let Some(v) = value(section, "directory") {
            config.cache.directory = expand_tilde(v);
        }
        if let Some(v) = value(section, "static_version") {
            config.cache.static_version = v.to_string();
        }
        if let Some(v) = value(section, "texture_version") {
            config.cache.texture_version = v.to_string();
        }
        if let Some(v) = value(section, "memory_size") {
            let size = parse_size(v).map_err(|_| {
                invalid(
                    "cache",
                    "memory_size",
                    v,
                    "expected format like '512MB', '2GB', or '1024KB'",
                )
            })?;
            // Zero means unbounded
            config.cache.memory_size = (size > 0).then_some(size);
        }

        if config.cache.static_version == config.cache.texture_version {
            return Err(invalid(
                "cache",
                "texture_version",
                &config.cache.texture_version,
                "must differ from static_version",
            ));
        }
    }

    // [manifest]
    if let Some(section) = ini.section(Some("manifest")) {
        if let Some(v) = section.get("paths") {
            let paths: Vec<String> = v
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if let Some(bad) = paths.iter().find(|p| !p.starts_with('/')) {
                return Err(invalid(
                    "manifest",
                    "paths",
                    bad,
                    "each path must start with '/'",
                ));
            }
            config.manifest.paths = paths;
        }
    }

    // [delivery]
    if let Some(section) = ini.section(Some("delivery")) {
        if let Some(v) = value(section, "texture_root") {
            config.delivery.texture_root = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = value(section, "origin") {
            let origin = Url::parse(v)
                .map_err(|e| invalid("delivery", "origin", v, &e.to_string()))?;
            if !matches!(origin.scheme(), "http" | "https") {
                return Err(invalid("delivery", "origin", v, "must be an http or https URL"));
            }
            config.delivery.origin = origin;
        }
    }

    // [network]
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = value(section, "timeout_secs") {
            config.network.timeout_secs = v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    invalid(
                        "network",
                        "timeout_secs",
                        v,
                        "must be a positive integer (seconds)",
                    )
                })?;
        }
    }

    Ok(config)
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
