//! Content Relay
//!
//! Recovers structured content from unreliable generator output and packages
//! it into per-destination publish payloads:
//! - Escape normalization and four-strategy JSON recovery for fenced,
//!   prose-wrapped, or truncated responses
//! - Destination-specific normalization and thread segmentation
//! - Image marker resolution against a pre-fetched asset cache
//! - Size enforcement with lossless chunking and boundary-aware truncation

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::context::PublishContext;
pub use domain::payload::DispatchOutcome;
pub use domain::platform::Platform;
pub use domain::record::RawPayload;
pub use infrastructure::Pipeline;
