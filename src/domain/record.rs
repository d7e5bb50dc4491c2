//! Raw generator output and the record recovered from it

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque payload received from the upstream generator.
///
/// Upstream automation hands the pipeline whatever the generator returned:
/// sometimes a pre-parsed object, more often a string that may or may not be
/// valid JSON.
#[derive(Debug, Clone)]
pub enum RawPayload {
    Text(String),
    Structured(Value),
}

impl RawPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Unwrap a generator response envelope into a payload.
    ///
    /// Accepted shapes, first present wins: an `output` string field, a
    /// nested `content.parts[].text` array, a plain `text` field, or the
    /// value itself when it is already a string. Any other object is treated
    /// as an already-structured record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Object(ref map) => {
                if let Some(Value::String(output)) = map.get("output") {
                    return Self::Text(output.clone());
                }

                if let Some(parts) = map
                    .get("content")
                    .and_then(|c| c.get("parts"))
                    .and_then(Value::as_array)
                {
                    let joined: String = parts
                        .iter()
                        .filter_map(|p| p.get("text").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                        .join("");

                    if !joined.is_empty() {
                        return Self::Text(joined);
                    }
                }

                if let Some(Value::String(text)) = map.get("text") {
                    return Self::Text(text.clone());
                }

                Self::Structured(value)
            }
            other => Self::Text(other.to_string()),
        }
    }

    /// The payload as text, if it is not a pre-parsed object.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Structured(_) => None,
        }
    }

    /// Length of the raw input, for diagnostics.
    pub fn raw_length(&self) -> usize {
        match self {
            Self::Text(s) => s.len(),
            Self::Structured(v) => v.to_string().len(),
        }
    }
}

/// A field-to-value mapping recovered from the generator output.
///
/// `recovered` is set when the record was produced by the degraded regex
/// strategy rather than a strict parse; `warning` carries the human-readable
/// reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoveredRecord {
    pub fields: serde_json::Map<String, Value>,
    #[serde(default)]
    pub recovered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RecoveredRecord {
    /// Create a record from a strict-parsed JSON object.
    pub fn from_object(fields: serde_json::Map<String, Value>) -> Self {
        Self {
            fields,
            recovered: false,
            warning: None,
        }
    }

    /// Mark the record as produced by degraded recovery.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.recovered = true;
        self.warning = Some(warning.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Get a string field, treating non-strings as absent.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn slug(&self) -> Option<&str> {
        self.get_str("slug")
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.get_str("meta_description")
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.get_str("subtitle")
    }

    /// Keyword list: accepts a JSON array of strings or a comma-separated
    /// string, since the regex recovery path can only capture the latter.
    pub fn keywords(&self) -> Vec<String> {
        match self.fields.get("keywords") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|k| k.trim().trim_matches('"').to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Which recovery strategy produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMethod {
    /// Input was already a structured object.
    Direct,
    /// Strict parse after stripping a fenced code block.
    Fenced,
    /// Strict parse of the first-brace/last-brace substring.
    BraceBounded,
    /// Field-level regex extraction from truncated or malformed input.
    FieldRegex,
}

impl RecoveryMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Fenced => "fenced",
            Self::BraceBounded => "brace_bounded",
            Self::FieldRegex => "field_regex",
        }
    }
}
