//! Individual recovery strategies, each a pure function
//!
//! The cascade in the parent module tries these in order; keeping each one
//! independently callable is what makes the degraded paths testable on
//! their own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::record::RecoveredRecord;
use crate::infrastructure::escape;

/// Leading/trailing fenced code block markers, optionally language-tagged.
static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```(?:json|javascript|js)?\s*\n?").unwrap());
static FENCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n?```\s*$").unwrap());

/// Array-valued keyword field, best-effort.
static KEYWORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""keywords"\s*:\s*\[([^\]]*)\]"#).unwrap());

/// Metadata fields recovered independently on the regex path.
const METADATA_FIELDS: [&str; 4] = ["title", "slug", "meta_description", "subtitle"];

/// Content fields worth pulling out of truncated input, most specific first.
pub const CONTENT_FIELDS: [&str; 4] = ["formatted_markdown", "markdown", "content", "text"];

/// Remove a wrapping fenced code block, if present.
pub fn strip_fences(text: &str) -> String {
    let without_open = FENCE_OPEN_RE.replace(text, "");
    FENCE_CLOSE_RE.replace(&without_open, "").into_owned()
}

fn object_record(value: Value) -> Option<RecoveredRecord> {
    match value {
        Value::Object(map) => Some(RecoveredRecord::from_object(map)),
        _ => None,
    }
}

/// Strategy 2: fence-strip then strict parse.
pub fn parse_fenced(text: &str) -> Option<RecoveredRecord> {
    let cleaned = strip_fences(text);
    let value: Value = serde_json::from_str(cleaned.trim()).ok()?;
    object_record(value)
}

/// Strategy 3: strict parse of the first-brace to last-brace substring.
///
/// Handles prose before or after the real payload.
pub fn parse_brace_bounded(text: &str) -> Option<RecoveredRecord> {
    let cleaned = strip_fences(text);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }

    let value: Value = serde_json::from_str(&cleaned[start..=end]).ok()?;
    object_record(value)
}

/// Pull a single string field's value out of possibly-truncated JSON text.
///
/// The capture runs to the first unescaped quote or to end-of-string, so a
/// value cut off mid-generation is still recovered in full.
pub fn extract_string_field(text: &str, field: &str) -> Option<String> {
    let pattern = format!(r#""{}"\s*:\s*"((?:\\.|[^"\\])*)"#, regex::escape(field));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;
    let raw = caps.get(1)?.as_str();

    if raw.is_empty() {
        return None;
    }

    Some(escape::normalize(raw))
}

/// Strategy 4: field-level regex recovery for truncated input.
///
/// Requires at least one content field; metadata fields are each
/// best-effort and never block one another.
pub fn recover_fields(text: &str) -> Option<RecoveredRecord> {
    let cleaned = strip_fences(text);

    let (field, content) = CONTENT_FIELDS
        .iter()
        .find_map(|f| extract_string_field(&cleaned, f).map(|c| (*f, c)))?;

    let mut record = RecoveredRecord::default()
        .with_warning("Strict JSON parse failed; content recovered via field extraction");
    record.insert(field, Value::String(content));

    for meta in METADATA_FIELDS {
        if let Some(value) = extract_string_field(&cleaned, meta) {
            record.insert(meta, Value::String(value));
        }
    }

    if let Some(caps) = KEYWORDS_RE.captures(&cleaned) {
        let keywords: Vec<Value> = caps[1]
            .split(',')
            .map(|k| k.trim().trim_matches('"'))
            .filter(|k| !k.is_empty())
            .map(|k| Value::String(k.to_string()))
            .collect();
        if !keywords.is_empty() {
            record.insert("keywords", Value::Array(keywords));
        }
    }

    Some(record)
}
