//! Image assets and the external lookup collaborators

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque handle to previously-fetched image bytes.
///
/// The pipeline never fetches binaries itself; the surrounding automation
/// populates the cache before dispatch and attaches whatever handle its
/// uploader understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryHandle(pub String);

impl BinaryHandle {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

/// One previously-downloaded image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryHandle>,
}

impl ImageAsset {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            asset_number: None,
            binary: None,
        }
    }

    pub fn with_asset_number(mut self, number: u32) -> Self {
        self.asset_number = Some(number);
        self
    }

    pub fn with_binary(mut self, handle: BinaryHandle) -> Self {
        self.binary = Some(handle);
        self
    }

    pub fn has_binary(&self) -> bool {
        self.binary.is_some()
    }
}

/// External, pre-populated collection of image records.
///
/// Read-only from the pipeline's point of view; it outlives any single
/// invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCache {
    pub assets: Vec<ImageAsset>,
}

impl AssetCache {
    pub fn new(assets: Vec<ImageAsset>) -> Self {
        Self { assets }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.assets.iter()
    }

    /// A cache where no binary has been fetched yet (metadata only).
    pub fn metadata_only(&self) -> bool {
        self.assets.iter().all(|a| !a.has_binary())
    }
}

/// Marker-number to already-uploaded URL lookup, for the CDN substitution
/// path. Populated by the upload step outside the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUrlMap {
    pub urls: HashMap<u32, String>,
}

impl ImageUrlMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, marker_number: u32, url: impl Into<String>) -> Self {
        self.urls.insert(marker_number, url.into());
        self
    }

    pub fn get(&self, marker_number: u32) -> Option<&str> {
        self.urls.get(&marker_number).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
