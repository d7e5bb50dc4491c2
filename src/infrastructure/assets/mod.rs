//! Asset resolution and per-policy marker handling
//!
//! The resolver maps `<<IMAGE_n>>` markers to cache entries; the functions
//! here apply a destination's asset policy to the draft text or units.
//! Every resolution attempt lands in the diagnostic trace.

pub mod resolver;

pub use resolver::resolve;

use crate::domain::asset::{AssetCache, ImageUrlMap};
use crate::domain::content::{split_into_blocks, ContentBlock};
use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::PostUnit;

/// Split text around its markers and resolve each image block.
pub fn resolve_blocks(
    text: &str,
    cache: &AssetCache,
    trace: &mut DiagnosticTrace,
) -> Vec<ContentBlock> {
    let mut blocks = split_into_blocks(text);

    for block in blocks.iter_mut() {
        let ContentBlock::Image {
            image_number,
            resolved_asset,
            ..
        } = block
        else {
            continue;
        };

        match resolve(cache, *image_number) {
            Some(asset) => {
                trace.asset_resolved();
                *resolved_asset = Some(asset.clone());
            }
            None => trace.asset_unresolved(*image_number),
        }
    }

    blocks
}

/// Replace markers with human-readable placeholder lines.
///
/// Resolved markers name the cached file; unresolved ones flag pending
/// work so an editor can spot them in the destination.
pub fn substitute_placeholders(
    text: &str,
    cache: &AssetCache,
    trace: &mut DiagnosticTrace,
) -> String {
    resolve_blocks(text, cache, trace)
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { content } => content,
            ContentBlock::Image {
                image_number,
                resolved_asset,
                ..
            } => match resolved_asset {
                Some(asset) => format!("[Image: {}]", asset.file_name),
                None => format!("[Image {} pending]", image_number),
            },
        })
        .collect()
}

/// Replace markers with markdown image syntax from the uploaded-URL map.
///
/// A marker without an uploaded URL is dropped; a broken image reference
/// in a published article is worse than a missing one.
pub fn substitute_inline_urls(
    text: &str,
    urls: &ImageUrlMap,
    alt_title: Option<&str>,
    trace: &mut DiagnosticTrace,
) -> String {
    split_into_blocks(text)
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { content } => content,
            ContentBlock::Image { image_number, .. } => match urls.get(image_number) {
                Some(url) => {
                    trace.asset_resolved();
                    let alt = alt_title
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Image {}", image_number));
                    format!("![{}]({})", alt, url)
                }
                None => {
                    trace.asset_unresolved(image_number);
                    String::new()
                }
            },
        })
        .collect()
}

/// Attach resolved binaries to thread units that reference an image.
///
/// Units whose marker cannot be resolved, or whose cache entry carries no
/// binary, go out as text-only posts.
pub fn attach_binaries(units: &mut [PostUnit], cache: &AssetCache, trace: &mut DiagnosticTrace) {
    for unit in units.iter_mut() {
        let Some(number) = unit.image_number else {
            continue;
        };

        match resolve(cache, number) {
            Some(asset) if asset.has_binary() => {
                trace.asset_resolved();
                unit.attached_asset = Some(asset.clone());
            }
            Some(_) => {
                trace.warn(format!(
                    "Image {} matched a cache entry without fetched bytes",
                    number
                ));
                trace.asset_unresolved(number);
            }
            None => {
                trace.asset_unresolved(number);
            }
        }
    }
}

/// Count marker references in units against the cache, without rewriting.
///
/// Destinations that carry the marker through to the payload still want
/// the resolution outcome in the trace.
pub fn trace_marker_references(
    units: &[PostUnit],
    cache: &AssetCache,
    trace: &mut DiagnosticTrace,
) {
    for unit in units {
        let Some(number) = unit.image_number else {
            continue;
        };

        if resolve(cache, number).is_some() {
            trace.asset_resolved();
        } else {
            trace.asset_unresolved(number);
        }
    }
}
