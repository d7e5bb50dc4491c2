//! Long-form CMS strategy: chunked rich-text page properties
//!
//! Markdown stays intact; the destination's display layer renders it. The
//! only rewriting is dropping a generator habit: a leading platform-name
//! heading, optionally followed by a horizontal rule.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LimitsConfig;
use crate::domain::context::{ItemMetadata, PublishContext};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::PlatformDraft;
use crate::domain::error::PipelineError;
use crate::domain::payload::{NotionPayload, PlatformPayload, RichTextProperty};
use crate::domain::platform::{AssetPolicy, Platform, PlatformStrategy};
use crate::infrastructure::limits;

static LEADING_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#{1,6}[^\n]*(?:\n+|$)").unwrap());

static LEADING_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:-{3,}|\*{3,}|_{3,})\s*(?:\n+|$)").unwrap());

/// The page property carrying the article body.
const CONTENT_PROPERTY: &str = "Content";

#[derive(Debug)]
pub struct NotionStrategy {
    chunk_chars: usize,
    max_chunks: usize,
}

impl NotionStrategy {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            chunk_chars: limits.notion_chunk_chars,
            max_chunks: limits.notion_max_chunks,
        }
    }
}

impl Default for NotionStrategy {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl PlatformStrategy for NotionStrategy {
    fn platform(&self) -> Platform {
        Platform::Notion
    }

    fn char_limit(&self) -> Option<usize> {
        None
    }

    fn asset_policy(&self) -> AssetPolicy {
        AssetPolicy::PlaceholderText
    }

    fn normalize(&self, text: &str, _metadata: &ItemMetadata) -> String {
        let stripped = LEADING_HEADING_RE.replace(text, "");
        let stripped = LEADING_RULE_RE.replace(&stripped, "");
        stripped.trim().to_string()
    }

    fn segment(&self, text: &str) -> PlatformDraft {
        PlatformDraft::document(text)
    }

    fn assemble(
        &self,
        draft: PlatformDraft,
        ctx: &PublishContext,
        trace: &mut DiagnosticTrace,
    ) -> Result<PlatformPayload, PipelineError> {
        let PlatformDraft::Document { text } = draft else {
            return Err(PipelineError::assembly(
                self.name(),
                "expected a document draft",
            ));
        };

        let chunks = limits::chunk_text(&text, self.chunk_chars)?;
        let chunks = limits::enforce_chunk_ceiling(chunks, self.max_chunks, trace);

        let mut payload = NotionPayload {
            properties: Default::default(),
        };
        payload
            .properties
            .insert(CONTENT_PROPERTY.to_string(), RichTextProperty::from_chunks(chunks));

        let meta = &ctx.metadata;
        if let Some(description) = &meta.meta_description {
            payload
                .properties
                .insert("Meta Description".to_string(), RichTextProperty::single(description));
        }
        if let Some(slug) = &meta.slug {
            payload
                .properties
                .insert("Slug".to_string(), RichTextProperty::single(slug));
        }
        if !meta.keywords.is_empty() {
            payload.properties.insert(
                "Keywords".to_string(),
                RichTextProperty::single(meta.keywords.join(", ")),
            );
        }

        Ok(PlatformPayload::Notion(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> NotionStrategy {
        NotionStrategy::default()
    }

    #[test]
    fn test_strips_leading_heading() {
        let out = strategy().normalize("# Blog Draft\n\nHello world", &ItemMetadata::new());
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn test_strips_heading_and_rule() {
        let out = strategy().normalize("# Notion\n---\n\nBody text", &ItemMetadata::new());
        assert_eq!(out, "Body text");
    }

    #[test]
    fn test_keeps_interior_headings() {
        let out = strategy().normalize("# Draft\n\nIntro\n\n## Section\n\nMore", &ItemMetadata::new());
        assert_eq!(out, "Intro\n\n## Section\n\nMore");
    }

    #[test]
    fn test_no_heading_untouched() {
        let out = strategy().normalize("Plain opening line", &ItemMetadata::new());
        assert_eq!(out, "Plain opening line");
    }

    #[test]
    fn test_markers_survive_normalization() {
        let out = strategy().normalize("# T\n\nBefore <<IMAGE_1>> after", &ItemMetadata::new());
        assert!(out.contains("<<IMAGE_1>>"));
    }

    #[test]
    fn test_assemble_chunks_content_property() {
        let mut trace = DiagnosticTrace::new(0);
        let limits = LimitsConfig {
            notion_chunk_chars: 10,
            ..Default::default()
        };
        let strategy = NotionStrategy::new(&limits);
        let draft = strategy.segment("a paragraph that is longer than ten chars");

        let payload = strategy
            .assemble(draft, &PublishContext::new(), &mut trace)
            .unwrap();

        let PlatformPayload::Notion(notion) = payload else {
            panic!("wrong payload variant");
        };
        let content = &notion.properties[CONTENT_PROPERTY];
        assert!(content.rich_text.len() > 1);

        let rejoined: String = content
            .rich_text
            .iter()
            .map(|s| s.text.content.as_str())
            .collect();
        assert_eq!(rejoined, "a paragraph that is longer than ten chars");
    }

    #[test]
    fn test_assemble_includes_seo_properties() {
        let mut trace = DiagnosticTrace::new(0);
        let ctx = PublishContext::new().with_metadata(
            ItemMetadata::new()
                .with_slug("my-post")
                .with_meta_description("A description")
                .with_keywords(vec!["rust".into(), "pipelines".into()]),
        );

        let payload = strategy()
            .assemble(PlatformDraft::document("body"), &ctx, &mut trace)
            .unwrap();

        let PlatformPayload::Notion(notion) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(notion.properties["Slug"].rich_text[0].text.content, "my-post");
        assert_eq!(
            notion.properties["Keywords"].rich_text[0].text.content,
            "rust, pipelines"
        );
        assert!(notion.properties.contains_key("Meta Description"));
    }

    #[test]
    fn test_assemble_rejects_thread_draft() {
        let mut trace = DiagnosticTrace::new(0);
        let draft = PlatformDraft::thread(vec![]);

        let result = strategy().assemble(draft, &PublishContext::new(), &mut trace);
        assert!(result.is_err());
    }
}
