//! Dispatch command - full pipeline run, payloads printed as JSON

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::platform::Platform;
use crate::infrastructure::{logging, Pipeline};

#[derive(Args)]
pub struct DispatchArgs {
    /// Raw generator output file; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// JSON file with the asset cache, image URL map, and item metadata
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// Destination to dispatch to; all destinations when omitted
    #[arg(short, long)]
    pub platform: Option<String>,
}

pub fn run(args: DispatchArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let raw = super::read_payload(&args.input)?;
    let ctx = super::load_context(args.context.as_deref())?;

    let platforms = match &args.platform {
        Some(name) => vec![name.parse::<Platform>()?],
        None => Platform::all(),
    };

    info!(destinations = platforms.len(), "dispatching content item");

    let outcomes: Vec<_> = platforms
        .into_iter()
        .map(|platform| Pipeline::for_platform(platform, &config.limits).dispatch(&raw, &ctx))
        .collect();

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
