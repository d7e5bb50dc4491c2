//! Inspect command - recovery and extraction only, diagnostics printed

use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::content::ExtractedContent;
use crate::domain::diagnostics::DiagnosticTrace;
use crate::infrastructure::{extract, logging, recovery};

#[derive(Args)]
pub struct InspectArgs {
    /// Raw generator output file; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,
}

#[derive(Serialize)]
struct InspectReport {
    content: ExtractedContent,
    diagnostics: DiagnosticTrace,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let raw = super::read_payload(&args.input)?;
    let mut diagnostics = DiagnosticTrace::new(raw.raw_length());

    let record = match recovery::recover(&raw) {
        Some((record, method)) => {
            diagnostics.set_recovery(method);
            if let Some(warning) = record.warning.clone() {
                diagnostics.warn(warning);
            }
            Some(record)
        }
        None => None,
    };

    let (content, method) = extract::extract(record.as_ref(), &raw);
    diagnostics.set_extraction(method, &content.source_field);

    let report = InspectReport {
        content,
        diagnostics,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
