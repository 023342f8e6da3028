//! AssetTier CLI - Command-line interface
//!
//! Classifies devices, answers delivery questions and drives the asset
//! worker against a configured origin.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use assettier::logging::{default_log_dir, default_log_file, init_logging};
use commands::cache::CacheAction;
use commands::classify::{ClassifyArgs, TextureUrlArgs};
use commands::worker::{FetchArgs, PrefetchArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "assettier")]
#[command(version, about = "Device-aware texture delivery and asset caching", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.assettier/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a device and show its delivery policy
    Classify(ClassifyArgs),

    /// Print the texture URL for a base name at the device's quality
    TextureUrl(TextureUrlArgs),

    /// Install the manifest into the static store and retire stale stores
    Warm,

    /// Route a single request through the worker
    Fetch(FetchArgs),

    /// Pre-fetch textures into the texture store
    Prefetch(PrefetchArgs),

    /// Manage cache stores
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let _guard = match init_logging(&default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    debug!(config = ?config_path, "Running command");

    match cli.command {
        Commands::Classify(args) => commands::classify::run_classify(args, config_path),
        Commands::TextureUrl(args) => commands::classify::run_texture_url(args, config_path),
        Commands::Warm => commands::worker::run_warm(config_path),
        Commands::Fetch(args) => commands::worker::run_fetch(args, config_path),
        Commands::Prefetch(args) => commands::worker::run_prefetch(args, config_path),
        Commands::Cache { action } => commands::cache::run(action, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify_flags() {
        let cli = Cli::try_parse_from([
            "assettier",
            "classify",
            "--max-texture-size",
            "16384",
            "--memory-gb",
            "16",
            "--pixel-ratio",
            "2",
            "--network",
            "4g",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.signals.max_texture_size, 16384);
                assert_eq!(args.signals.memory_gb, Some(16));
                assert!(!args.json);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_prefetch_requires_urls() {
        assert!(Cli::try_parse_from(["assettier", "prefetch"]).is_err());
        assert!(Cli::try_parse_from(["assettier", "prefetch", "/textures/a.ktx2"]).is_ok());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["assettier", "cache", "list", "--config", "/tmp/c.ini"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.ini")));
    }
}
