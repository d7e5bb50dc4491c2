//! Platform strategy trait - one value per destination

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::context::{ItemMetadata, PublishContext};
use super::diagnostics::DiagnosticTrace;
use super::draft::PlatformDraft;
use super::error::PipelineError;
use super::payload::PlatformPayload;

/// Supported destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Notion,
    Hashnode,
    Twitter,
    Linkedin,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Hashnode => "hashnode",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
        }
    }

    pub fn all() -> Vec<Platform> {
        vec![Self::Notion, Self::Hashnode, Self::Twitter, Self::Linkedin]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Platform {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notion" => Ok(Self::Notion),
            "hashnode" => Ok(Self::Hashnode),
            "twitter" => Ok(Self::Twitter),
            "linkedin" => Ok(Self::Linkedin),
            other => Err(PipelineError::validation(format!(
                "Unknown platform: {}",
                other
            ))),
        }
    }
}

/// How a destination consumes image markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetPolicy {
    /// Cache is metadata-only; unresolved markers become a textual
    /// `[Image n pending]` placeholder.
    PlaceholderText,
    /// Markers are replaced inline with `![title](url)` from the URL map;
    /// unmapped markers are removed.
    InlineUrl,
    /// Markers are stripped from text and reported per unit by number.
    MarkerReference,
    /// Markers are stripped from text and the matched asset's binary handle
    /// is attached to the unit.
    AttachBinary,
}

/// Destination-specific behavior behind one generic pipeline.
///
/// Each destination is a small strategy value; the pipeline itself never
/// branches on the platform.
pub trait PlatformStrategy: Send + Sync + Debug {
    fn platform(&self) -> Platform;

    /// Per-post character cap, if the destination has one.
    fn char_limit(&self) -> Option<usize>;

    fn asset_policy(&self) -> AssetPolicy;

    /// Destination-specific text rewriting. Image markers must pass through
    /// untouched; marker handling happens later per `asset_policy`.
    fn normalize(&self, text: &str, metadata: &ItemMetadata) -> String;

    /// Split normalized text into the destination's draft shape.
    fn segment(&self, text: &str) -> PlatformDraft;

    /// Combine the resolved draft, context, and metadata into the
    /// destination request body.
    fn assemble(
        &self,
        draft: PlatformDraft,
        ctx: &PublishContext,
        trace: &mut DiagnosticTrace,
    ) -> Result<PlatformPayload, PipelineError>;

    fn name(&self) -> &'static str {
        self.platform().name()
    }
}
