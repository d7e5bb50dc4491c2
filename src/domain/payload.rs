//! Destination request-body shapes and the dispatch outcome

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::asset::BinaryHandle;
use super::diagnostics::DiagnosticTrace;
use super::draft::{PostKind, PostUnit, TextChunk};
use super::platform::Platform;

/// One span of a Notion rich-text property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextSpan {
    pub text: RichTextContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextContent {
    pub content: String,
}

impl RichTextSpan {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            text: RichTextContent {
                content: content.into(),
            },
        }
    }
}

/// A Notion page property carrying chunked rich text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichTextSpan>,
}

impl RichTextProperty {
    pub fn from_chunks(chunks: Vec<TextChunk>) -> Self {
        Self {
            rich_text: chunks
                .into_iter()
                .map(|c| RichTextSpan::new(c.content))
                .collect(),
        }
    }

    pub fn single(content: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichTextSpan::new(content)],
        }
    }
}

/// Long-form CMS page update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionPayload {
    pub properties: BTreeMap<String, RichTextProperty>,
}

/// Tag entry for the Hashnode publish mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashnodeTag {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashnodeMetaTags {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashnodeSettings {
    pub enable_table_of_contents: bool,
    pub delisted: bool,
}

impl Default for HashnodeSettings {
    fn default() -> Self {
        Self {
            enable_table_of_contents: true,
            delisted: false,
        }
    }
}

/// Mutation-style publish body for the alternate long-form platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashnodePayload {
    pub title: String,
    pub content_markdown: String,
    pub slug: String,
    /// At most five; extra tags are dropped during assembly.
    pub tags: Vec<HashnodeTag>,
    pub meta_tags: HashnodeMetaTags,
    pub settings: HashnodeSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "originalArticleURL", skip_serializing_if = "Option::is_none")]
    pub original_article_url: Option<String>,
}

/// One unit of a Twitter thread payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetUnit {
    pub order: u32,
    pub text: String,
    pub char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_marker: Option<String>,
    #[serde(rename = "type")]
    pub kind: PostKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterThread {
    pub posts: Vec<TweetUnit>,
}

impl TwitterThread {
    pub fn from_units(units: Vec<PostUnit>) -> Self {
        let posts = units
            .into_iter()
            .map(|u| TweetUnit {
                order: u.order,
                char_count: u.char_count,
                image_marker: u.image_number.map(|n| format!("<<IMAGE_{}>>", n)),
                kind: u.kind,
                text: u.text,
            })
            .collect();
        Self { posts }
    }
}

/// One unit of a LinkedIn post chain payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinUnit {
    pub order: u32,
    pub text: String,
    pub char_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<u32>,
    pub has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_attachment: Option<BinaryHandle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedinThread {
    pub posts: Vec<LinkedinUnit>,
}

impl LinkedinThread {
    /// Chain units: each post replies to the previous one's order.
    pub fn from_units(units: Vec<PostUnit>) -> Self {
        let mut previous: Option<u32> = None;
        let posts = units
            .into_iter()
            .map(|u| {
                let unit = LinkedinUnit {
                    order: u.order,
                    char_count: u.char_count,
                    in_reply_to: previous,
                    has_image: u.has_image(),
                    binary_attachment: u.attached_asset.and_then(|a| a.binary),
                    text: u.text,
                };
                previous = Some(unit.order);
                unit
            })
            .collect();
        Self { posts }
    }
}

/// Assembled destination request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformPayload {
    Notion(NotionPayload),
    Hashnode(HashnodePayload),
    Twitter(TwitterThread),
    Linkedin(LinkedinThread),
}

/// Final result of one dispatch: a payload with diagnostics, or a
/// per-destination skip. Neither variant is ever a panic or a thrown error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DispatchOutcome {
    Published {
        platform: Platform,
        payload: PlatformPayload,
        diagnostics: DiagnosticTrace,
    },
    Skipped {
        platform: Platform,
        error: bool,
        message: String,
        diagnostics: DiagnosticTrace,
    },
}

impl DispatchOutcome {
    pub fn published(
        platform: Platform,
        payload: PlatformPayload,
        diagnostics: DiagnosticTrace,
    ) -> Self {
        Self::Published {
            platform,
            payload,
            diagnostics,
        }
    }

    pub fn skipped(
        platform: Platform,
        message: impl Into<String>,
        diagnostics: DiagnosticTrace,
    ) -> Self {
        Self::Skipped {
            platform,
            error: true,
            message: message.into(),
            diagnostics,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    pub fn diagnostics(&self) -> &DiagnosticTrace {
        match self {
            Self::Published { diagnostics, .. } | Self::Skipped { diagnostics, .. } => diagnostics,
        }
    }
}
