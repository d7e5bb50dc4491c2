//! Explicit dependency bundle handed to the pipeline entry point

use serde::{Deserialize, Serialize};

use super::asset::{AssetCache, ImageUrlMap};

/// Upstream item metadata: title, slug, tags, descriptions.
///
/// Everything here comes from outside the pipeline; fields a destination
/// requires but the caller did not provide turn into per-destination skip
/// results, never a crash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl ItemMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn with_canonical_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = Some(url.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Everything a dispatch needs besides the raw payload.
///
/// Replaces the ambient named-node lookups of the original automation with
/// an explicit argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishContext {
    #[serde(default)]
    pub assets: AssetCache,
    #[serde(default)]
    pub image_urls: ImageUrlMap,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl PublishContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(mut self, assets: AssetCache) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_image_urls(mut self, image_urls: ImageUrlMap) -> Self {
        self.image_urls = image_urls;
        self
    }

    pub fn with_metadata(mut self, metadata: ItemMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::ImageAsset;

    #[test]
    fn test_context_builder() {
        let ctx = PublishContext::new()
            .with_assets(AssetCache::new(vec![ImageAsset::new("asset-1.png")]))
            .with_metadata(ItemMetadata::new().with_title("Post").with_slug("post"));

        assert_eq!(ctx.assets.len(), 1);
        assert_eq!(ctx.metadata.title.as_deref(), Some("Post"));
        assert!(ctx.image_urls.is_empty());
    }

    #[test]
    fn test_metadata_deserializes_with_defaults() {
        let meta: ItemMetadata = serde_json::from_str("{\"title\":\"T\"}").unwrap();

        assert_eq!(meta.title.as_deref(), Some("T"));
        assert!(meta.tags.is_empty());
        assert!(meta.slug.is_none());
    }
}
