//! Configuration file handling for `~/.assettier/config.ini`.
//!
//! Every key is optional. A missing file, section or key falls back to the
//! defaults below, which reproduce the reference deployment.

use std::path::{Path, PathBuf};

use ini::Ini;
use reqwest::Url;
use thiserror::Error;

use crate::cache::{DEFAULT_STATIC_VERSION, DEFAULT_TEXTURE_VERSION};
use crate::delivery::DEFAULT_TEXTURE_ROOT;
use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::manifest::DEFAULT_STATIC_PATHS;

/// Origin the manifest is resolved against when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Which cache backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    #[default]
    Memory,
    Disk,
}

impl CacheBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Memory => "memory",
            CacheBackend::Disk => "disk",
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "disk" => Ok(CacheBackend::Disk),
            _ => Err(()),
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// Root of the disk backend.
    pub directory: PathBuf,
    pub static_version: String,
    pub texture_version: String,
    /// Per-store byte bound for the memory backend. `None` is unbounded.
    pub memory_size: Option<u64>,
}

/// `[manifest]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSettings {
    pub paths: Vec<String>,
}

/// `[delivery]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    pub texture_root: String,
    pub origin: Url,
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    pub timeout_secs: u64,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub cache: CacheSettings,
    pub manifest: ManifestSettings,
    pub delivery: DeliverySettings,
    pub network: NetworkSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                backend: CacheBackend::Memory,
                directory: config_directory().join("cache"),
                static_version: DEFAULT_STATIC_VERSION.to_string(),
                texture_version: DEFAULT_TEXTURE_VERSION.to_string(),
                memory_size: None,
            },
            manifest: ManifestSettings {
                paths: DEFAULT_STATIC_PATHS.iter().map(|p| p.to_string()).collect(),
            },
            delivery: DeliverySettings {
                texture_root: DEFAULT_TEXTURE_ROOT.to_string(),
                origin: default_origin(),
            },
            network: NetworkSettings {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }
}

fn default_origin() -> Url {
    // Literal URL; parse cannot fail.
    Url::parse(DEFAULT_ORIGIN).unwrap()
}

/// Get the path to the config directory (`~/.assettier`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".assettier")
}

/// Get the path to the config file (`~/.assettier/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
