//! Diagnostic trace attached to every pipeline output

use serde::{Deserialize, Serialize};

use super::content::ExtractionMethod;
use super::record::RecoveryMethod;

/// Accumulated metadata describing how an output was produced.
///
/// Observability only; nothing in the pipeline branches on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticTrace {
    pub raw_length: usize,
    pub parse_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_method: Option<RecoveryMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<ExtractionMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
    pub segment_count: usize,
    pub resolved_assets: usize,
    pub unresolved_assets: usize,
    pub chunks_discarded: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

impl DiagnosticTrace {
    pub fn new(raw_length: usize) -> Self {
        Self {
            raw_length,
            ..Default::default()
        }
    }

    pub fn set_recovery(&mut self, method: RecoveryMethod) {
        self.parse_success = true;
        self.recovery_method = Some(method);
    }

    pub fn set_extraction(&mut self, method: ExtractionMethod, source_field: &str) {
        self.extraction_method = Some(method);
        self.source_field = Some(source_field.to_string());
    }

    /// Record a warning and emit it on the log side channel.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(warning = %message, "pipeline warning");
        self.warnings.push(message);
    }

    pub fn asset_resolved(&mut self) {
        self.resolved_assets += 1;
    }

    pub fn asset_unresolved(&mut self, marker_number: u32) {
        self.unresolved_assets += 1;
        self.warn(format!("Unresolved image marker {}", marker_number));
    }
}
