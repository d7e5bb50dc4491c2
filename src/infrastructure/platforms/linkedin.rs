//! Post-chain strategy for the 2800-character destination
//!
//! Long drafts publish as a lead post plus replies. Each block becomes one
//! post, flattened to plaintext; a block's image marker selects the binary
//! attached to that post (the destination takes one image per post).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LimitsConfig;
use crate::domain::content;
use crate::domain::context::{ItemMetadata, PublishContext};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::{PlatformDraft, PostKind, PostUnit};
use crate::domain::error::PipelineError;
use crate::domain::payload::{LinkedinThread, PlatformPayload};
use crate::domain::platform::{AssetPolicy, Platform, PlatformStrategy};
use crate::infrastructure::markdown;

/// A line of three or more dashes, the draft's post delimiter.
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*$").unwrap());

#[derive(Debug)]
pub struct LinkedinStrategy {
    char_limit: usize,
}

impl LinkedinStrategy {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            char_limit: limits.linkedin_chars,
        }
    }
}

impl Default for LinkedinStrategy {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl PlatformStrategy for LinkedinStrategy {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn char_limit(&self) -> Option<usize> {
        Some(self.char_limit)
    }

    fn asset_policy(&self) -> AssetPolicy {
        AssetPolicy::AttachBinary
    }

    fn normalize(&self, text: &str, _metadata: &ItemMetadata) -> String {
        // Flattening happens per block in `segment`; the dash delimiters
        // must still be visible as markdown lines here.
        text.trim().to_string()
    }

    fn segment(&self, text: &str) -> PlatformDraft {
        let blocks: Vec<&str> = DELIMITER_RE
            .split(text)
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect();
        let total = blocks.len();

        let units = blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| {
                let flattened = markdown::to_plain_text(block);
                let image_number = content::first_marker(&flattened).map(|(_, n)| n);
                let post_text = markdown::collapse_newlines(
                    content::strip_markers(&flattened).trim(),
                );

                let kind = PostKind::from_position(idx, total);
                let mut unit = PostUnit::new((idx + 1) as u32, post_text, kind);
                if let Some(number) = image_number {
                    unit = unit.with_image_number(number);
                }
                unit
            })
            .collect();

        PlatformDraft::thread(units)
    }

    fn assemble(
        &self,
        draft: PlatformDraft,
        _ctx: &PublishContext,
        _trace: &mut DiagnosticTrace,
    ) -> Result<PlatformPayload, PipelineError> {
        match draft {
            PlatformDraft::Thread { units } => {
                Ok(PlatformPayload::Linkedin(LinkedinThread::from_units(units)))
            }
            PlatformDraft::Document { .. } => Err(PipelineError::assembly(
                self.name(),
                "expected a thread draft",
            )),
        }
    }
}
