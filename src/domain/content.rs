//! Extracted content and the marker-aware block sequence

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::asset::ImageAsset;

/// Inline image marker pattern, e.g. `<<IMAGE_3>>`.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<<IMAGE_(\d+)>>").unwrap());

/// The canonical content string plus which record field it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub text: String,
    pub source_field: String,
}

impl ExtractedContent {
    pub fn new(text: impl Into<String>, source_field: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_field: source_field.into(),
        }
    }
}

/// How the canonical content was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Named field from a recovered record.
    RecordField,
    /// Regex pull of the primary field from the raw string.
    RawFieldRegex,
    /// Body of a fenced code block in the raw string.
    RawFencedBlock,
    /// Fence-stripped raw string, verbatim.
    RawCleaned,
    /// Diagnostic placeholder substituted for implausibly short content.
    Placeholder,
}

impl ExtractionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecordField => "record_field",
            Self::RawFieldRegex => "raw_field_regex",
            Self::RawFencedBlock => "raw_fenced_block",
            Self::RawCleaned => "raw_cleaned",
            Self::Placeholder => "placeholder",
        }
    }
}

/// One ordered piece of a marker-bearing document.
///
/// Order is significant and preserved end-to-end; image blocks keep the
/// literal marker text so unresolved markers can be re-emitted or dropped
/// per platform policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { content: String },
    Image {
        marker: String,
        image_number: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        resolved_asset: Option<ImageAsset>,
    },
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn image(marker: impl Into<String>, image_number: u32) -> Self {
        Self::Image {
            marker: marker.into(),
            image_number,
            resolved_asset: None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Split text into an ordered block sequence around image markers.
///
/// Text between markers is kept verbatim, so rejoining the blocks (with the
/// original marker text for unresolved images) reproduces the input.
pub fn split_into_blocks(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut last_end = 0;

    for caps in MARKER_RE.captures_iter(text) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        let number: u32 = match caps[1].parse() {
            Ok(n) => n,
            Err(_) => continue,
        };

        if m.start() > last_end {
            blocks.push(ContentBlock::text(&text[last_end..m.start()]));
        }
        blocks.push(ContentBlock::image(m.as_str(), number));
        last_end = m.end();
    }

    if last_end < text.len() {
        blocks.push(ContentBlock::text(&text[last_end..]));
    }

    blocks
}

/// The first marker in a text, if any, with its literal form.
pub fn first_marker(text: &str) -> Option<(String, u32)> {
    let caps = MARKER_RE.captures(text)?;
    let number = caps[1].parse().ok()?;
    Some((caps[0].to_string(), number))
}

/// Remove every image marker from a text.
pub fn strip_markers(text: &str) -> String {
    MARKER_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_order_and_text() {
        let blocks = split_into_blocks("before <<IMAGE_1>> middle <<IMAGE_3>> after");

        assert_eq!(blocks.len(), 5);
        assert!(matches!(&blocks[0], ContentBlock::Text { content } if content == "before "));
        assert!(matches!(
            &blocks[1],
            ContentBlock::Image { image_number: 1, .. }
        ));
        assert!(matches!(&blocks[2], ContentBlock::Text { content } if content == " middle "));
        assert!(matches!(
            &blocks[3],
            ContentBlock::Image { image_number: 3, .. }
        ));
        assert!(matches!(&blocks[4], ContentBlock::Text { content } if content == " after"));
    }

    #[test]
    fn test_split_without_markers() {
        let blocks = split_into_blocks("plain paragraph");

        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].is_image());
    }

    #[test]
    fn test_split_markers_not_contiguous() {
        let blocks = split_into_blocks("<<IMAGE_2>> x <<IMAGE_7>>");
        let numbers: Vec<u32> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Image { image_number, .. } => Some(*image_number),
                ContentBlock::Text { .. } => None,
            })
            .collect();

        assert_eq!(numbers, vec![2, 7]);
    }

    #[test]
    fn test_first_marker() {
        let (marker, n) = first_marker("text <<IMAGE_4>> more").unwrap();
        assert_eq!(marker, "<<IMAGE_4>>");
        assert_eq!(n, 4);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("a <<IMAGE_1>>b"), "a b");
    }
}
