//! The generic dispatch pipeline
//!
//! One pipeline per destination strategy. Stages run in a fixed order:
//! recover, extract, normalize, apply the asset policy, segment, enforce
//! size limits, assemble. Every invocation returns a `DispatchOutcome`;
//! failures become per-destination skips, never panics.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::LimitsConfig;
use crate::domain::context::{ItemMetadata, PublishContext};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::PlatformDraft;
use crate::domain::error::PipelineError;
use crate::domain::payload::{DispatchOutcome, PlatformPayload};
use crate::domain::platform::{AssetPolicy, Platform, PlatformStrategy};
use crate::domain::record::{RawPayload, RecoveredRecord};
use crate::infrastructure::platforms::PlatformFactory;
use crate::infrastructure::{assets, extract, limits, recovery};

/// How much of the raw input the failure placeholder quotes.
const RAW_PREVIEW_CHARS: usize = 500;

pub struct Pipeline {
    strategy: Arc<dyn PlatformStrategy>,
    min_content_chars: usize,
}

impl Pipeline {
    pub fn new(strategy: Arc<dyn PlatformStrategy>, limits: &LimitsConfig) -> Self {
        Self {
            strategy,
            min_content_chars: limits.min_content_chars,
        }
    }

    pub fn for_platform(platform: Platform, limits: &LimitsConfig) -> Self {
        Self::new(PlatformFactory::create(platform, limits), limits)
    }

    /// Run one content item through every stage for this destination.
    pub fn dispatch(&self, raw: &RawPayload, ctx: &PublishContext) -> DispatchOutcome {
        let platform = self.strategy.platform();
        let mut trace = DiagnosticTrace::new(raw.raw_length());

        tracing::debug!(
            platform = %platform,
            raw_length = trace.raw_length,
            "dispatching content item"
        );

        match self.run(raw, ctx, &mut trace) {
            Ok(payload) => DispatchOutcome::published(platform, payload, trace),
            Err(err) => {
                tracing::warn!(platform = %platform, error = %err, "dispatch skipped");
                DispatchOutcome::skipped(platform, err.to_string(), trace)
            }
        }
    }

    fn run(
        &self,
        raw: &RawPayload,
        ctx: &PublishContext,
        trace: &mut DiagnosticTrace,
    ) -> Result<PlatformPayload, PipelineError> {
        let record = match recovery::recover(raw) {
            Some((record, method)) => {
                trace.set_recovery(method);
                if let Some(warning) = record.warning.clone() {
                    trace.warn(warning);
                }
                Some(record)
            }
            None => {
                trace.warn("No recovery strategy succeeded; using raw string as content");
                None
            }
        };

        let (content, method) = extract::extract(record.as_ref(), raw);
        trace.set_extraction(method, &content.source_field);

        let text = self.guard_min_length(content.text, raw, trace);
        let metadata = merge_metadata(&ctx.metadata, record.as_ref());
        let ctx = ctx.clone().with_metadata(metadata);

        let normalized = self.strategy.normalize(&text, &ctx.metadata);
        let resolved = self.apply_text_policy(&normalized, &ctx, trace);

        let mut draft = self.strategy.segment(&resolved);
        trace.segment_count = draft.unit_count();

        self.enforce_char_limit(&mut draft);
        self.apply_unit_policy(&mut draft, &ctx, trace);

        self.strategy.assemble(draft, &ctx, trace)
    }

    /// Substitute a diagnostic placeholder document when extraction came
    /// back implausibly short. Destinations still get a well-formed payload
    /// so the surrounding automation keeps its delivery semantics.
    fn guard_min_length(
        &self,
        text: String,
        raw: &RawPayload,
        trace: &mut DiagnosticTrace,
    ) -> String {
        if text.trim().chars().count() >= self.min_content_chars {
            return text;
        }

        trace.warn(format!(
            "Extracted content under {} characters; substituting diagnostic placeholder",
            self.min_content_chars
        ));
        trace.set_extraction(
            crate::domain::content::ExtractionMethod::Placeholder,
            "placeholder",
        );

        let preview: String = match raw.as_text() {
            Some(t) => t.graphemes(true).take(RAW_PREVIEW_CHARS).collect(),
            None => String::new(),
        };

        format!(
            "Content generation failed: extracted text was empty or too short.\n\n\
             Raw output preview:\n\n{}",
            preview
        )
    }

    /// Marker handling for policies that rewrite the document text.
    fn apply_text_policy(
        &self,
        text: &str,
        ctx: &PublishContext,
        trace: &mut DiagnosticTrace,
    ) -> String {
        match self.strategy.asset_policy() {
            AssetPolicy::PlaceholderText => {
                assets::substitute_placeholders(text, &ctx.assets, trace)
            }
            AssetPolicy::InlineUrl => assets::substitute_inline_urls(
                text,
                &ctx.image_urls,
                ctx.metadata.title.as_deref(),
                trace,
            ),
            AssetPolicy::MarkerReference | AssetPolicy::AttachBinary => text.to_string(),
        }
    }

    /// Marker handling for policies that operate on thread units.
    fn apply_unit_policy(
        &self,
        draft: &mut PlatformDraft,
        ctx: &PublishContext,
        trace: &mut DiagnosticTrace,
    ) {
        let PlatformDraft::Thread { units } = draft else {
            return;
        };

        match self.strategy.asset_policy() {
            AssetPolicy::MarkerReference => {
                assets::trace_marker_references(units, &ctx.assets, trace);
            }
            AssetPolicy::AttachBinary => {
                assets::attach_binaries(units, &ctx.assets, trace);
            }
            AssetPolicy::PlaceholderText | AssetPolicy::InlineUrl => {}
        }
    }

    fn enforce_char_limit(&self, draft: &mut PlatformDraft) {
        let Some(limit) = self.strategy.char_limit() else {
            return;
        };

        match draft {
            PlatformDraft::Thread { units } => {
                for unit in units.iter_mut() {
                    if unit.char_count > limit {
                        unit.text = limits::truncate_post(&unit.text, limit);
                        unit.recount();
                    }
                }
            }
            PlatformDraft::Document { text } => {
                *text = limits::truncate_post(text, limit);
            }
        }
    }
}

/// Caller-supplied metadata wins; recovered record fields fill the gaps.
fn merge_metadata(base: &ItemMetadata, record: Option<&RecoveredRecord>) -> ItemMetadata {
    let mut merged = base.clone();
    let Some(record) = record else {
        return merged;
    };

    if merged.title.is_none() {
        merged.title = record.title().map(str::to_string);
    }
    if merged.slug.is_none() {
        merged.slug = record.slug().map(str::to_string);
    }
    if merged.subtitle.is_none() {
        merged.subtitle = record.subtitle().map(str::to_string);
    }
    if merged.meta_description.is_none() {
        merged.meta_description = record.meta_description().map(str::to_string);
    }
    if merged.keywords.is_empty() {
        merged.keywords = record.keywords();
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{AssetCache, ImageAsset, ImageUrlMap};
    use crate::domain::content::ExtractionMethod;
    use crate::domain::payload::PlatformPayload;
    use crate::domain::record::RecoveryMethod;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    fn long_body(prefix: &str) -> String {
        format!("{} {}", prefix, "filler text to clear the minimum length threshold easily.".repeat(3))
    }

    #[test]
    fn test_end_to_end_notion_scenario() {
        let raw = RawPayload::text(
            "```json\n{\"formatted_markdown\":\"# Blog Draft\\n\\nHello <<IMAGE_1>> world, this is a long enough body to publish without tripping the placeholder guard at all.\"}\n```",
        );
        let ctx = PublishContext::new().with_assets(AssetCache::new(vec![
            ImageAsset::new("asset-1.png").with_asset_number(1),
        ]));

        let pipeline = Pipeline::for_platform(Platform::Notion, &limits());
        let outcome = pipeline.dispatch(&raw, &ctx);

        assert!(outcome.is_published());
        let diag = outcome.diagnostics();
        assert!(diag.parse_success);
        assert_eq!(diag.recovery_method, Some(RecoveryMethod::Fenced));
        assert_eq!(diag.extraction_method, Some(ExtractionMethod::RecordField));
        assert_eq!(diag.source_field.as_deref(), Some("formatted_markdown"));
        assert_eq!(diag.resolved_assets, 1);
        assert_eq!(diag.unresolved_assets, 0);

        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Notion(notion) = payload else {
            panic!("wrong payload variant");
        };
        let body: String = notion.properties["Content"]
            .rich_text
            .iter()
            .map(|s| s.text.content.as_str())
            .collect();
        assert!(body.starts_with("Hello [Image: asset-1.png] world"));
        assert!(!body.contains("# Blog Draft"));
    }

    #[test]
    fn test_missing_slug_skips_hashnode_only() {
        let raw = RawPayload::text(format!("{{\"content\":\"{}\"}}", long_body("Body.")));

        let pipeline = Pipeline::for_platform(Platform::Hashnode, &limits());
        let outcome = pipeline.dispatch(&raw, &PublishContext::new());

        let DispatchOutcome::Skipped { error, message, .. } = outcome else {
            panic!("expected skipped");
        };
        assert!(error);
        assert!(message.contains("slug"));
    }

    #[test]
    fn test_short_content_gets_placeholder() {
        let raw = RawPayload::text("{\"content\":\"tiny\"}");

        let pipeline = Pipeline::for_platform(Platform::Notion, &limits());
        let outcome = pipeline.dispatch(&raw, &PublishContext::new());

        assert!(outcome.is_published());
        let diag = outcome.diagnostics();
        assert_eq!(diag.extraction_method, Some(ExtractionMethod::Placeholder));
        assert!(!diag.warnings.is_empty());

        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Notion(notion) = payload else {
            panic!("wrong payload variant");
        };
        let body = &notion.properties["Content"].rich_text[0].text.content;
        assert!(body.contains("Content generation failed"));
        assert!(body.contains("tiny"));
    }

    #[test]
    fn test_total_parse_failure_still_publishes() {
        let raw = RawPayload::text(long_body("Pure prose with no JSON structure."));

        let pipeline = Pipeline::for_platform(Platform::Notion, &limits());
        let outcome = pipeline.dispatch(&raw, &PublishContext::new());

        assert!(outcome.is_published());
        let diag = outcome.diagnostics();
        assert!(!diag.parse_success);
        assert_eq!(diag.extraction_method, Some(ExtractionMethod::RawCleaned));
    }

    #[test]
    fn test_twitter_thread_dispatch() {
        let body = format!(
            "Tweet 1/3: {}\\n\\n---\\n\\nTweet 2/3: Middle tweet <<IMAGE_1>>\\n\\n---\\n\\nTweet 3/3: Follow for more!",
            long_body("The hook!")
        );
        let raw = RawPayload::text(format!("{{\"formatted_markdown\":\"{}\"}}", body));
        let ctx = PublishContext::new().with_assets(AssetCache::new(vec![
            ImageAsset::new("asset-1.png").with_asset_number(1),
        ]));

        let pipeline = Pipeline::for_platform(Platform::Twitter, &limits());
        let outcome = pipeline.dispatch(&raw, &ctx);

        assert!(outcome.is_published());
        let diag = outcome.diagnostics();
        assert_eq!(diag.segment_count, 3);
        assert_eq!(diag.resolved_assets, 1);

        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Twitter(thread) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(thread.posts.len(), 3);
        assert!(thread.posts.iter().all(|p| p.char_count <= 280));
        assert_eq!(thread.posts[1].image_marker.as_deref(), Some("<<IMAGE_1>>"));
    }

    #[test]
    fn test_linkedin_attaches_binary() {
        let body = format!(
            "{}\\n\\n---\\n\\nSecond post <<IMAGE_1>>",
            long_body("Lead post.")
        );
        let raw = RawPayload::text(format!("{{\"content\":\"{}\"}}", body));
        let ctx = PublishContext::new().with_assets(AssetCache::new(vec![
            ImageAsset::new("asset-1.png")
                .with_asset_number(1)
                .with_binary(crate::domain::asset::BinaryHandle::new("blob:1")),
        ]));

        let pipeline = Pipeline::for_platform(Platform::Linkedin, &limits());
        let outcome = pipeline.dispatch(&raw, &ctx);

        assert!(outcome.is_published());
        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Linkedin(thread) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(thread.posts.len(), 2);
        assert!(thread.posts[1].has_image);
        assert_eq!(thread.posts[1].in_reply_to, Some(1));
    }

    #[test]
    fn test_hashnode_slug_recovered_from_record() {
        let raw = RawPayload::text(format!(
            "{{\"content\":\"{}\",\"slug\":\"from-record\",\"title\":\"From Record\"}}",
            long_body("Article body.")
        ));
        let urls = ImageUrlMap::new();
        let ctx = PublishContext::new().with_image_urls(urls);

        let pipeline = Pipeline::for_platform(Platform::Hashnode, &limits());
        let outcome = pipeline.dispatch(&raw, &ctx);

        assert!(outcome.is_published());
        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Hashnode(hashnode) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(hashnode.slug, "from-record");
        assert_eq!(hashnode.title, "From Record");
    }

    #[test]
    fn test_caller_metadata_wins_over_record() {
        let record = RecoveredRecord::from_object(
            serde_json::from_str(r#"{"title":"Record Title","slug":"record-slug"}"#).unwrap(),
        );
        let base = ItemMetadata::new().with_title("Caller Title");

        let merged = merge_metadata(&base, Some(&record));

        assert_eq!(merged.title.as_deref(), Some("Caller Title"));
        assert_eq!(merged.slug.as_deref(), Some("record-slug"));
    }

    #[test]
    fn test_char_limit_enforced_independent_of_strategy() {
        use crate::domain::platform::mock::MockStrategy;

        // The pass-through strategy keeps segmentation out of the picture,
        // so the truncation applied here is the pipeline's own.
        let strategy = Arc::new(MockStrategy::new().with_char_limit(40));
        let pipeline = Pipeline::new(strategy, &limits());
        let raw = RawPayload::text(format!("{{\"content\":\"{}\"}}", long_body("Lead.")));

        let outcome = pipeline.dispatch(&raw, &PublishContext::new());

        assert!(outcome.is_published());
        let DispatchOutcome::Published { payload, .. } = outcome else {
            panic!("expected published");
        };
        let PlatformPayload::Twitter(thread) = payload else {
            panic!("wrong payload variant");
        };
        assert_eq!(thread.posts.len(), 1);
        assert!(thread.posts[0].char_count <= 40);
    }

    #[test]
    fn test_truncated_json_recovery_end_to_end() {
        let raw = RawPayload::text(format!(
            "{{\"formatted_markdown\":\"{}",
            long_body("Cut off mid-object.")
        ));

        let pipeline = Pipeline::for_platform(Platform::Notion, &limits());
        let outcome = pipeline.dispatch(&raw, &PublishContext::new());

        assert!(outcome.is_published());
        let diag = outcome.diagnostics();
        assert_eq!(diag.recovery_method, Some(RecoveryMethod::FieldRegex));
        assert!(diag.warnings.iter().any(|w| w.contains("recovered")));
    }
}
