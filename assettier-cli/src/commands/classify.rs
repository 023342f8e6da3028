//! Device classification commands: `classify` and `texture-url`.

use clap::Args;

use assettier::capability::{classify_logged, TierDescriptor};
use assettier::delivery::DeliveryPolicy;

use super::common::{load_config, SignalArgs};
use crate::error::CliError;

/// Arguments for `classify`.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub signals: SignalArgs,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `texture-url`.
#[derive(Debug, Args)]
pub struct TextureUrlArgs {
    /// Texture base name, without directory or extension
    pub basename: String,

    #[command(flatten)]
    pub signals: SignalArgs,
}

fn policy_for(
    signals: &SignalArgs,
    config_path: Option<&std::path::Path>,
) -> Result<DeliveryPolicy, CliError> {
    let config = load_config(config_path)?;
    let descriptor = classify_logged(&signals.signals());
    Ok(DeliveryPolicy::with_texture_root(
        descriptor,
        config.delivery.texture_root,
    ))
}

fn descriptor_json(descriptor: &TierDescriptor) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}

/// Print the tier descriptor and the delivery answers derived from it.
pub fn run_classify(
    args: ClassifyArgs,
    config_path: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let policy = policy_for(&args.signals, config_path)?;
    let descriptor = policy.descriptor();

    if args.json {
        println!("{}", descriptor_json(descriptor)?);
        return Ok(());
    }

    println!("Device");
    println!("  Max texture size: {}", descriptor.max_texture_size);
    println!("  Memory:           {} GB", descriptor.memory_gb);
    println!("  Pixel ratio:      {}", descriptor.pixel_ratio);
    println!("  Network:          {}", descriptor.network);
    println!("  Mobile:           {}", descriptor.is_mobile);
    println!();
    println!("Tier");
    println!("  Tier:             {}", descriptor.tier);
    println!("  Quality:          {}", descriptor.quality);
    println!("  Target FPS:       {}", descriptor.target_fps);
    println!("  Target DPR:       {}", descriptor.target_pixel_ratio);
    println!();
    println!("Delivery");
    println!("  Use KTX2:         {}", policy.should_use_ktx2());
    println!("  Concurrent loads: {}", policy.max_concurrent_loads());
    println!("  Example texture:  {}", policy.texture_url("example"));

    Ok(())
}

/// Print the texture URL for one base name.
pub fn run_texture_url(
    args: TextureUrlArgs,
    config_path: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let policy = policy_for(&args.signals, config_path)?;
    println!("{}", policy.texture_url(&args.basename));
    Ok(())
}
