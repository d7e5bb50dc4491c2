//! Domain layer - Core pipeline entities and traits

pub mod asset;
pub mod content;
pub mod context;
pub mod diagnostics;
pub mod draft;
pub mod error;
pub mod payload;
pub mod platform;
pub mod record;

pub use asset::{AssetCache, BinaryHandle, ImageAsset, ImageUrlMap};
pub use content::{
    first_marker, split_into_blocks, strip_markers, ContentBlock,
    ExtractedContent, ExtractionMethod,
};
pub use context::{ItemMetadata, PublishContext};
pub use diagnostics::DiagnosticTrace;
pub use draft::{PlatformDraft, PostKind, PostUnit, TextChunk};
pub use error::PipelineError;
pub use payload::{
    DispatchOutcome, HashnodeMetaTags, HashnodePayload, HashnodeSettings, HashnodeTag,
    LinkedinThread, LinkedinUnit, NotionPayload, PlatformPayload, RichTextProperty, RichTextSpan,
    TweetUnit, TwitterThread,
};
pub use platform::{AssetPolicy, Platform, PlatformStrategy};
pub use record::{RawPayload, RecoveredRecord, RecoveryMethod};
