//! Worker commands: `warm`, `fetch` and `prefetch`.

use std::path::Path;

use clap::Args;

use assettier::app::AssetApp;
use assettier::config::format_size;
use assettier::fetch::AssetRequest;
use assettier::lifecycle::ControlMessage;
use assettier::router::Interception;

use super::common::{load_app_config, runtime, SignalArgs};
use crate::error::CliError;

/// Arguments for `fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// URL or origin-relative path, e.g. /textures/rock.ktx2
    pub url: String,
}

/// Arguments for `prefetch`.
#[derive(Debug, Args)]
pub struct PrefetchArgs {
    /// Texture URLs or origin-relative paths
    #[arg(required = true)]
    pub urls: Vec<String>,
}

/// Populate the static store and retire stale stores.
pub fn run_warm(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_app_config(config_path)?;
    println!(
        "Installing {} manifest entries from {}",
        config.manifest.len(),
        config.origin
    );

    let rt = runtime()?;
    let app = rt.block_on(AssetApp::start(config, SignalArgs::default().signals()))?;

    if let Some(report) = app.start_report() {
        println!(
            "Cached {} entries ({}) in '{}'",
            report.install.entries,
            format_size(report.install.bytes as u64),
            report.install.store
        );
        if report.activation.deleted.is_empty() {
            println!("No stale stores");
        } else {
            for name in &report.activation.deleted {
                println!("Deleted stale store '{}'", name);
            }
        }
    }
    Ok(())
}

/// Route one request through the worker and describe the answer.
pub fn run_fetch(args: FetchArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_app_config(config_path)?;
    let request = AssetRequest::resolve(&config.origin, &args.url)?;

    let app = AssetApp::new(config, SignalArgs::default().signals())?;
    let rt = runtime()?;

    match rt.block_on(app.worker().handle_fetch(&request)) {
        Interception::PassThrough => {
            println!("{}: not intercepted ({} scheme)", request, request.scheme());
        }
        Interception::Respond(routed) => {
            println!("{}", request);
            println!("  Class:        {}", routed.class);
            println!("  Source:       {}", routed.source);
            println!("  Status:       {}", routed.response.status());
            if let Some(content_type) = routed.response.content_type() {
                println!("  Content-Type: {}", content_type);
            }
            println!("  Size:         {} bytes", routed.response.len());
        }
    }
    Ok(())
}

/// Send a CACHE_TEXTURES message and wait for the batch to finish.
pub fn run_prefetch(args: PrefetchArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_app_config(config_path)?;
    let app = AssetApp::new(config, SignalArgs::default().signals())?;
    let rt = runtime()?;

    let report = rt.block_on(async {
        let batch = app
            .worker()
            .handle_message(ControlMessage::cache_textures(args.urls))
            .await?;
        Ok::<_, CliError>(batch.join().await)
    })?;

    println!(
        "Pre-fetched {} textures: {} stored, {} skipped, {} failed",
        report.total(),
        report.stored,
        report.skipped,
        report.failed
    );
    Ok(())
}
