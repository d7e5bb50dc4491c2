//! Thread strategy for the 280-character destination
//!
//! Drafts arrive as one markdown document with `---` delimiters between
//! intended tweets and an optional `Tweet n/m` prefix per block. Blocks are
//! flattened to plaintext; the marker of each block becomes the unit's
//! image reference.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LimitsConfig;
use crate::domain::content;
use crate::domain::context::{ItemMetadata, PublishContext};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::{PlatformDraft, PostKind, PostUnit};
use crate::domain::error::PipelineError;
use crate::domain::payload::{PlatformPayload, TwitterThread};
use crate::domain::platform::{AssetPolicy, Platform, PlatformStrategy};
use crate::infrastructure::markdown;

/// A `---` line on its own; only a tweet delimiter when blank lines
/// surround it (see `split_blocks`).
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*---[ \t]*$").unwrap());

/// Optional `Tweet n/m` position prefix, possibly bolded.
static TWEET_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:\*\*)?\s*Tweet\s+(\d+)\s*/\s*\d+\s*:?\s*(?:\*\*)?\s*").unwrap());

#[derive(Debug)]
pub struct TwitterStrategy {
    char_limit: usize,
}

impl TwitterStrategy {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            char_limit: limits.twitter_chars,
        }
    }
}

impl Default for TwitterStrategy {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl PlatformStrategy for TwitterStrategy {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn char_limit(&self) -> Option<usize> {
        Some(self.char_limit)
    }

    fn asset_policy(&self) -> AssetPolicy {
        AssetPolicy::MarkerReference
    }

    fn normalize(&self, text: &str, _metadata: &ItemMetadata) -> String {
        // Flattening happens per block in `segment`; the delimiters must
        // still be visible as markdown lines here.
        text.trim().to_string()
    }

    fn segment(&self, text: &str) -> PlatformDraft {
        let blocks: Vec<String> = split_blocks(text)
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        let total = blocks.len();

        let units = blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| {
                let (declared_order, body) = strip_tweet_prefix(block);
                let flattened = markdown::to_plain_text(body);
                let image_number = content::first_marker(&flattened).map(|(_, n)| n);
                let tweet_text = content::strip_markers(&flattened).trim().to_string();

                // A declared prefix drives `order`, while kind and image
                // association follow the split index. The two disagree when
                // prefixes are only partially present; both behaviors are
                // kept as-is from the drafts this was built against.
                let order = declared_order.unwrap_or((idx + 1) as u32);
                let kind = PostKind::from_position(idx, total);

                let mut unit = PostUnit::new(order, tweet_text, kind);
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
                Ok(PlatformPayload::Twitter(TwitterThread::from_units(units)))
            }
            PlatformDraft::Document { .. } => Err(PipelineError::assembly(
                self.name(),
                "expected a thread draft",
            )),
        }
    }
}

/// Split the draft at `---` lines that have a blank line on both sides.
///
/// A `---` directly under a text line is markdown setext/rule syntax and
/// stays inside its block.
fn split_blocks(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let is_delimiter = DELIMITER_RE.is_match(line)
            && idx > 0
            && lines[idx - 1].trim().is_empty()
            && idx + 1 < lines.len()
            && lines[idx + 1].trim().is_empty();

        if is_delimiter {
            blocks.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    blocks.push(current.join("\n"));

    blocks
}

/// Split off a `Tweet n/m` prefix, returning the declared position if any.
fn strip_tweet_prefix(block: &str) -> (Option<u32>, &str) {
    match TWEET_PREFIX_RE.find(block) {
        Some(m) => {
            let declared = TWEET_PREFIX_RE
                .captures(block)
                .and_then(|caps| caps[1].parse().ok());
            (declared, &block[m.end()..])
        }
        None => (None, block),
    }
}
