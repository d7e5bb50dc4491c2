//! CLI module for the content relay
//!
//! Provides subcommands for exercising the pipeline:
//! - `dispatch`: run raw generator output through every stage and print the
//!   assembled payloads
//! - `inspect`: run recovery and extraction only and print the diagnostics

pub mod dispatch;
pub mod inspect;

use std::fs;
use std::io::Read;
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::domain::context::PublishContext;
use crate::domain::record::RawPayload;

/// Content Relay - Recover, normalize, and package generated drafts
#[derive(Parser)]
#[command(name = "content-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and print per-destination payloads
    Dispatch(dispatch::DispatchArgs),

    /// Run recovery and extraction only and print the diagnostics
    Inspect(inspect::InspectArgs),
}

/// Read the raw generator output from a file, or stdin for `-`.
pub(crate) fn read_payload(input: &str) -> anyhow::Result<RawPayload> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };

    // Pre-parsed JSON goes through the envelope unwrapping; anything else
    // is an opaque string for the recovery cascade.
    match serde_json::from_str(&text) {
        Ok(value) => Ok(RawPayload::from_value(value)),
        Err(_) => Ok(RawPayload::text(text)),
    }
}

/// Load the collaborator context (assets, image URLs, metadata) from JSON.
pub(crate) fn load_context(path: Option<&Path>) -> anyhow::Result<PublishContext> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(PublishContext::new()),
    }
}
