//! Recovery parser - turns opaque generator output into a structured record
//!
//! Four strategies, each tried only when the previous one fails:
//! already-structured passthrough, fence-strip + strict parse,
//! brace-bounded strict parse, then field-level regex recovery for
//! truncated input. `None` means all four failed; callers fall back to
//! treating the raw string as content rather than aborting.

pub mod strategies;

pub use strategies::{extract_string_field, strip_fences, CONTENT_FIELDS};

use crate::domain::record::{RawPayload, RecoveredRecord, RecoveryMethod};

/// Run the strategy cascade over a raw payload.
pub fn recover(raw: &RawPayload) -> Option<(RecoveredRecord, RecoveryMethod)> {
    match raw {
        RawPayload::Structured(value) => match value {
            serde_json::Value::Object(map) => Some((
                RecoveredRecord::from_object(map.clone()),
                RecoveryMethod::Direct,
            )),
            other => {
                // A structured non-object is rare; re-serialize and fall
                // through the text strategies.
                recover_text(&other.to_string())
            }
        },
        RawPayload::Text(text) => recover_text(text),
    }
}

fn recover_text(text: &str) -> Option<(RecoveredRecord, RecoveryMethod)> {
    if let Some(record) = strategies::parse_fenced(text) {
        return Some((record, RecoveryMethod::Fenced));
    }

    if let Some(record) = strategies::parse_brace_bounded(text) {
        return Some((record, RecoveryMethod::BraceBounded));
    }

    if let Some(record) = strategies::recover_fields(text) {
        tracing::debug!("strict parse failed, recovered via field regex");
        return Some((record, RecoveryMethod::FieldRegex));
    }

    None
}
