//! Marker-to-asset resolution cascade
//!
//! Three lookups, strictest first: an explicit asset number on the cache
//! entry, an `asset-N` token in the file name, then the first digit run
//! after an `asset` token compared numerically. Digits with no `asset`
//! token in front of them never match; file names like `cover-2024.png`
//! fall through to the unresolved path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::asset::{AssetCache, ImageAsset};

/// `asset3`, `asset-3`, `asset_3`, any case.
static ASSET_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)asset[-_]?(\d+)").unwrap());

/// First digit run somewhere after an `asset` token, e.g. `asset-image-3`.
static ASSET_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)asset\D*?(\d+)").unwrap());

/// Find the cache entry for an image marker number, if any.
pub fn resolve(cache: &AssetCache, marker_number: u32) -> Option<&ImageAsset> {
    if let Some(asset) = cache.iter().find(|a| a.asset_number == Some(marker_number)) {
        return Some(asset);
    }

    if let Some(asset) = cache
        .iter()
        .find(|a| asset_token_number(&a.file_name) == Some(marker_number))
    {
        return Some(asset);
    }

    cache
        .iter()
        .find(|a| digit_run_after_asset_token(&a.file_name) == Some(marker_number))
}

/// Number from an `asset-N` style token in the file name.
fn asset_token_number(file_name: &str) -> Option<u32> {
    ASSET_TOKEN_RE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// First run of digits following an `asset` token in the file name.
fn digit_run_after_asset_token(file_name: &str) -> Option<u32> {
    ASSET_DIGIT_RE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}
