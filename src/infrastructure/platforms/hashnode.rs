//! Alternate long-form strategy: template-tag sanitization + publish mutation
//!
//! Drafts reuse source markdown that may carry liquid-style directives and
//! templating expressions from the site's own renderer. None of that
//! renders on the destination, so directive blocks go away entirely and
//! output expressions become visible inline code.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::context::{ItemMetadata, PublishContext};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::PlatformDraft;
use crate::domain::error::PipelineError;
use crate::domain::payload::{
    HashnodeMetaTags, HashnodePayload, HashnodeSettings, HashnodeTag, PlatformPayload,
};
use crate::domain::platform::{AssetPolicy, Platform, PlatformStrategy};

/// Paired directive blocks whose contents must not be published.
static DIRECTIVE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\{%-?\s*(?:note|warning|tip|callout|info|danger)\b[^%]*?-?%\}.*?\{%-?\s*end\w*\s*-?%\}",
    )
    .unwrap()
});

/// Any residual single directive tag.
static DIRECTIVE_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{%[^%]*?%\}").unwrap());

/// `{{ expression }}` output expressions.
static OUTPUT_EXPR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").unwrap());

/// GitHub-style alert opener, e.g. `> [!NOTE]`.
static ALERT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>\s*\[!(\w+)\]\s*$").unwrap());

const MAX_TAGS: usize = 5;

#[derive(Debug, Default)]
pub struct HashnodeStrategy;

impl HashnodeStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformStrategy for HashnodeStrategy {
    fn platform(&self) -> Platform {
        Platform::Hashnode
    }

    fn char_limit(&self) -> Option<usize> {
        None
    }

    fn asset_policy(&self) -> AssetPolicy {
        AssetPolicy::InlineUrl
    }

    fn normalize(&self, text: &str, _metadata: &ItemMetadata) -> String {
        let out = DIRECTIVE_BLOCK_RE.replace_all(text, "");
        let out = DIRECTIVE_TAG_RE.replace_all(&out, "");
        let out = OUTPUT_EXPR_RE.replace_all(&out, "`$1`");
        let out = ALERT_RE.replace_all(&out, |caps: &regex::Captures| {
            format!("**{}:**", capitalize(&caps[1]))
        });
        out.trim().to_string()
    }

    fn segment(&self, text: &str) -> PlatformDraft {
        PlatformDraft::document(text)
    }

    fn assemble(
        &self,
        draft: PlatformDraft,
        ctx: &PublishContext,
        _trace: &mut DiagnosticTrace,
    ) -> Result<PlatformPayload, PipelineError> {
        let PlatformDraft::Document { text } = draft else {
            return Err(PipelineError::assembly(
                self.name(),
                "expected a document draft",
            ));
        };

        let meta = &ctx.metadata;
        let slug = meta.slug.clone().ok_or_else(|| {
            PipelineError::missing_metadata(self.name(), "slug is required to publish")
        })?;
        let title = meta.title.clone().unwrap_or_else(|| slug.clone());

        let tags = meta
            .tags
            .iter()
            .take(MAX_TAGS)
            .map(|name| HashnodeTag {
                slug: slugify(name),
                name: name.clone(),
            })
            .collect();

        let payload = HashnodePayload {
            meta_tags: HashnodeMetaTags {
                title: title.clone(),
                description: meta.meta_description.clone().unwrap_or_default(),
            },
            title,
            content_markdown: text,
            slug,
            tags,
            settings: HashnodeSettings::default(),
            subtitle: meta.subtitle.clone(),
            original_article_url: meta.canonical_url.clone(),
        };

        Ok(PlatformPayload::Hashnode(payload))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        HashnodeStrategy::new().normalize(text, &ItemMetadata::new())
    }

    #[test]
    fn test_removes_directive_block_with_contents() {
        let out = normalize("Before\n\n{% note %}\nInternal only.\n{% endnote %}\n\nAfter");
        assert_eq!(out, "Before\n\n\n\nAfter");
    }

    #[test]
    fn test_removes_all_directive_kinds() {
        for kind in ["note", "warning", "tip", "callout", "info", "danger"] {
            let text = format!("a {{% {kind} %}}hidden{{% end{kind} %}} b");
            let out = normalize(&text);
            assert!(!out.contains("hidden"), "{} block survived", kind);
        }
    }

    #[test]
    fn test_strips_residual_single_tags() {
        let out = normalize("keep {% include 'x' %} this");
        assert_eq!(out, "keep  this");
    }

    #[test]
    fn test_output_expression_becomes_inline_code() {
        let out = normalize("value is {{ item.price }} today");
        assert_eq!(out, "value is `item.price` today");
    }

    #[test]
    fn test_alert_becomes_bold_label() {
        let out = normalize("> [!NOTE]\n> Remember this.");
        assert_eq!(out, "**Note:**\n> Remember this.");
    }

    #[test]
    fn test_alert_label_capitalization() {
        let out = normalize("> [!WARNING]\n> Careful.");
        assert!(out.starts_with("**Warning:**"));
    }

    #[test]
    fn test_markers_survive_normalization() {
        let out = normalize("Intro <<IMAGE_1>> {% note %}x{% endnote %} <<IMAGE_2>>");
        assert!(out.contains("<<IMAGE_1>>"));
        assert!(out.contains("<<IMAGE_2>>"));
    }

    #[test]
    fn test_assemble_requires_slug() {
        let mut trace = DiagnosticTrace::new(0);
        let result = HashnodeStrategy::new().assemble(
            PlatformDraft::document("body"),
            &PublishContext::new(),
            &mut trace,
        );

        assert!(matches!(
            result,
            Err(PipelineError::MissingMetadata { .. })
        ));
    }

    #[test]
    fn test_assemble_caps_tags_at_five() {
        let mut trace = DiagnosticTrace::new(0);
        let tags: Vec<String> = (0..8).map(|i| format!("Tag {}", i)).collect();
        let ctx = PublishContext::new()
            .with_metadata(ItemMetadata::new().with_slug("post").with_tags(tags));

        let payload = HashnodeStrategy::new()
            .assemble(PlatformDraft::document("body"), &ctx, &mut trace)
            .unwrap();

        let PlatformPayload::Hashnode(body) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(body.tags.len(), 5);
        assert_eq!(body.tags[0].slug, "tag-0");
    }

    #[test]
    fn test_assemble_full_metadata() {
        let mut trace = DiagnosticTrace::new(0);
        let ctx = PublishContext::new().with_metadata(
            ItemMetadata::new()
                .with_title("A Title")
                .with_slug("a-title")
                .with_subtitle("Sub")
                .with_meta_description("Desc")
                .with_canonical_url("https://example.com/a-title"),
        );

        let payload = HashnodeStrategy::new()
            .assemble(PlatformDraft::document("body"), &ctx, &mut trace)
            .unwrap();

        let PlatformPayload::Hashnode(body) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(body.title, "A Title");
        assert_eq!(body.slug, "a-title");
        assert_eq!(body.subtitle.as_deref(), Some("Sub"));
        assert_eq!(body.meta_tags.description, "Desc");
        assert_eq!(
            body.original_article_url.as_deref(),
            Some("https://example.com/a-title")
        );
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let mut trace = DiagnosticTrace::new(0);
        let ctx =
            PublishContext::new().with_metadata(ItemMetadata::new().with_slug("fallback-post"));

        let payload = HashnodeStrategy::new()
            .assemble(PlatformDraft::document("b"), &ctx, &mut trace)
            .unwrap();

        let PlatformPayload::Hashnode(body) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(body.title, "fallback-post");
    }
}
