//! Cache management CLI commands.

use std::path::Path;

use clap::Subcommand;

use assettier::cache::StorageConfig;
use assettier::config::format_size;

use super::common::{load_app_config, runtime};
use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// List stores with their entry counts
    List,
    /// Delete every store
    Clear,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_app_config(config_path)?;

    match &config.storage {
        StorageConfig::Memory { max_size_bytes } => {
            println!("Cache backend: memory (nothing persists between runs)");
            if let Some(max) = max_size_bytes {
                println!("  Per-store limit: {}", format_size(*max));
            }
            return Ok(());
        }
        StorageConfig::Disk { directory } => {
            println!("Cache backend: disk at {}", directory.display());
        }
    }

    let storage = config.storage.open();
    let rt = runtime()?;

    rt.block_on(async {
        let names = storage.names().await?;
        if names.is_empty() {
            println!("  No stores");
            return Ok(());
        }

        match action {
            CacheAction::List => {
                for name in names {
                    let store = storage.open(&name).await?;
                    let entries = store.len().await?;
                    let status = if config.versions.is_current(&name) {
                        "current"
                    } else {
                        "stale"
                    };
                    println!("  {:<32} {:>6} entries  ({})", name, entries, status);
                }
            }
            CacheAction::Clear => {
                for name in names {
                    storage.delete(&name).await?;
                    println!("  Deleted {}", name);
                }
            }
        }
        Ok::<(), CliError>(())
    })
}
