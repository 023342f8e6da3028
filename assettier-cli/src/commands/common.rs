//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::Args;
use tokio::runtime::Runtime;

use assettier::app::AppConfig;
use assettier::capability::{
    host_hints, DeviceSignals, NetworkClass, PlatformHints, ReportedGraphicsContext,
};
use assettier::config::ConfigFile;

use crate::error::CliError;

/// Texture size assumed when none is given.
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;

/// Device signals supplied on the command line.
///
/// Anything not given falls back to what the host reports, then to the
/// classifier defaults.
#[derive(Debug, Clone, Args)]
pub struct SignalArgs {
    /// Maximum texture dimension of the graphics context
    #[arg(long, default_value_t = DEFAULT_MAX_TEXTURE_SIZE)]
    pub max_texture_size: u32,

    /// Device memory in GB (defaults to the host's total memory)
    #[arg(long)]
    pub memory_gb: Option<u32>,

    /// Device pixel ratio
    #[arg(long)]
    pub pixel_ratio: Option<f64>,

    /// Network effective type: slow-2g, 2g, 3g or 4g
    #[arg(long)]
    pub network: Option<NetworkClass>,

    /// Platform identifier, e.g. "iPhone" or "Linux x86_64"
    #[arg(long)]
    pub platform: Option<String>,
}

impl Default for SignalArgs {
    fn default() -> Self {
        Self {
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
            memory_gb: None,
            pixel_ratio: None,
            network: None,
            platform: None,
        }
    }
}

impl SignalArgs {
    /// Overlay the arguments on the host's hints.
    pub fn hints(&self) -> PlatformHints {
        let mut hints = host_hints();
        if let Some(gb) = self.memory_gb {
            hints.memory_gb = Some(gb);
        }
        if let Some(ratio) = self.pixel_ratio {
            hints.pixel_ratio = Some(ratio);
        }
        if let Some(network) = self.network {
            hints.effective_type = Some(network.as_str().to_string());
        }
        if let Some(platform) = &self.platform {
            hints.platform = Some(platform.clone());
        }
        hints
    }

    pub fn signals(&self) -> DeviceSignals {
        let context = ReportedGraphicsContext::new(self.max_texture_size);
        DeviceSignals::sample(&context, &self.hints())
    }
}

/// Load the configuration file from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Load configuration and translate it for the application.
pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    Ok(AppConfig::load(path)?)
}

/// Create a multi-threaded runtime for async commands.
pub fn runtime() -> Result<Runtime, CliError> {
    Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))
}
