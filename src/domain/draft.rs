//! Platform drafts: segmented post units and bounded text chunks

use serde::{Deserialize, Serialize};

use super::asset::ImageAsset;

/// Role of a post unit within a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Hook,
    Content,
    Cta,
}

impl PostKind {
    /// Classify by position in the delimiter-split sequence.
    pub fn from_position(index: usize, total: usize) -> Self {
        if index == 0 {
            Self::Hook
        } else if index + 1 == total {
            Self::Cta
        } else {
            Self::Content
        }
    }
}

/// One unit of a thread draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUnit {
    /// Intended position, 1-based. May diverge from the split index when a
    /// declared position prefix was present in the source block.
    pub order: u32,
    pub text: String,
    pub char_count: usize,
    pub kind: PostKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_asset: Option<ImageAsset>,
}

impl PostUnit {
    pub fn new(order: u32, text: impl Into<String>, kind: PostKind) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            order,
            text,
            char_count,
            kind,
            image_number: None,
            attached_asset: None,
        }
    }

    pub fn with_image_number(mut self, number: u32) -> Self {
        self.image_number = Some(number);
        self
    }

    pub fn with_attached_asset(mut self, asset: ImageAsset) -> Self {
        self.attached_asset = Some(asset);
        self
    }

    pub fn has_image(&self) -> bool {
        self.attached_asset.is_some()
    }

    /// Recompute `char_count` after the text was rewritten.
    pub fn recount(&mut self) {
        self.char_count = self.text.chars().count();
    }
}

/// Destination-specific structured draft, before payload assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PlatformDraft {
    /// A single long-form document; markdown left intact.
    Document { text: String },
    /// An ordered sequence of post units.
    Thread { units: Vec<PostUnit> },
}

impl PlatformDraft {
    pub fn document(text: impl Into<String>) -> Self {
        Self::Document { text: text.into() }
    }

    pub fn thread(units: Vec<PostUnit>) -> Self {
        Self::Thread { units }
    }

    pub fn unit_count(&self) -> usize {
        match self {
            Self::Document { .. } => 1,
            Self::Thread { units } => units.len(),
        }
    }
}

/// A bounded-length fragment of a longer text.
///
/// Concatenating all chunks for a field reproduces the original text
/// exactly, unless the chunk-count ceiling forced truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub content: String,
    pub index: usize,
}

impl TextChunk {
    pub fn new(content: impl Into<String>, index: usize) -> Self {
        Self {
            content: content.into(),
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
