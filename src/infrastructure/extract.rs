//! Field extractor - picks the canonical content out of a recovered record
//!
//! Fixed priority order across known field names, first non-empty wins.
//! When recovery failed entirely, a fallback chain over the raw string
//! guarantees the pipeline always produces some text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::content::{ExtractedContent, ExtractionMethod};
use crate::domain::record::{RawPayload, RecoveredRecord};
use crate::infrastructure::escape;
use crate::infrastructure::recovery::{self, CONTENT_FIELDS};

/// Body of a fenced code block, any language tag.
static FENCED_BODY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\s*\n(.*?)```").unwrap());

/// Extract the canonical content string, falling back to raw handling when
/// no record is available.
pub fn extract(
    record: Option<&RecoveredRecord>,
    raw: &RawPayload,
) -> (ExtractedContent, ExtractionMethod) {
    if let Some(record) = record {
        for field in CONTENT_FIELDS {
            if let Some(value) = record.get_str(field) {
                let normalized = escape::normalize(value);
                if !normalized.trim().is_empty() {
                    return (
                        ExtractedContent::new(normalized, field),
                        ExtractionMethod::RecordField,
                    );
                }
            }
        }
    }

    extract_from_raw(raw)
}

/// Tertiary fallback applied directly on the raw string.
fn extract_from_raw(raw: &RawPayload) -> (ExtractedContent, ExtractionMethod) {
    let text = match raw.as_text() {
        Some(t) => t.to_string(),
        None => match raw {
            RawPayload::Structured(v) => v.to_string(),
            RawPayload::Text(t) => t.clone(),
        },
    };

    for field in CONTENT_FIELDS {
        if let Some(value) = recovery::extract_string_field(&text, field) {
            if !value.trim().is_empty() {
                return (
                    ExtractedContent::new(value, field),
                    ExtractionMethod::RawFieldRegex,
                );
            }
        }
    }

    if let Some(caps) = FENCED_BODY_RE.captures(&text) {
        let body = escape::normalize(caps[1].trim());
        if !body.is_empty() {
            return (
                ExtractedContent::new(body, "raw"),
                ExtractionMethod::RawFencedBlock,
            );
        }
    }

    let cleaned = escape::normalize(recovery::strip_fences(&text).trim());
    (
        ExtractedContent::new(cleaned, "raw"),
        ExtractionMethod::RawCleaned,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record_with(field: &str, value: &str) -> RecoveredRecord {
        let mut record = RecoveredRecord::default();
        record.insert(field, Value::String(value.to_string()));
        record
    }

    #[test]
    fn test_priority_order() {
        let mut record = record_with("markdown", "secondary");
        record.insert("formatted_markdown", json!("primary"));
        record.insert("content", json!("tertiary"));

        let (content, method) = extract(Some(&record), &RawPayload::text(""));

        assert_eq!(content.text, "primary");
        assert_eq!(content.source_field, "formatted_markdown");
        assert_eq!(method, ExtractionMethod::RecordField);
    }

    #[test]
    fn test_empty_field_skipped() {
        let mut record = record_with("formatted_markdown", "   ");
        record.insert("content", json!("real body"));

        let (content, _) = extract(Some(&record), &RawPayload::text(""));

        assert_eq!(content.text, "real body");
        assert_eq!(content.source_field, "content");
    }

    #[test]
    fn test_record_text_is_escape_normalized() {
        let record = record_with("content", "line one\\n\\nline two");
        let (content, _) = extract(Some(&record), &RawPayload::text(""));

        assert_eq!(content.text, "line one\n\nline two");
    }

    #[test]
    fn test_null_record_field_regex_fallback() {
        let raw = RawPayload::text(r#"prose {"formatted_markdown":"Recovered body"#);
        let (content, method) = extract(None, &raw);

        assert_eq!(content.text, "Recovered body");
        assert_eq!(method, ExtractionMethod::RawFieldRegex);
    }

    #[test]
    fn test_null_record_fenced_block_fallback() {
        let raw = RawPayload::text("```markdown\n# A Draft\n\nBody text.\n```");
        let (content, method) = extract(None, &raw);

        assert_eq!(content.text, "# A Draft\n\nBody text.");
        assert_eq!(method, ExtractionMethod::RawFencedBlock);
    }

    #[test]
    fn test_null_record_cleaned_raw_fallback() {
        let raw = RawPayload::text("plain prose, no structure at all");
        let (content, method) = extract(None, &raw);

        assert_eq!(content.text, "plain prose, no structure at all");
        assert_eq!(method, ExtractionMethod::RawCleaned);
    }
}
