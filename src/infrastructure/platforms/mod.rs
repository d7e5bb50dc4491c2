//! Destination strategies and their factory

pub mod hashnode;
pub mod linkedin;
pub mod notion;
pub mod twitter;

pub use hashnode::HashnodeStrategy;
pub use linkedin::LinkedinStrategy;
pub use notion::NotionStrategy;
pub use twitter::TwitterStrategy;

use std::sync::Arc;

use crate::config::LimitsConfig;
use crate::domain::platform::{Platform, PlatformStrategy};

/// Factory for creating platform strategies
#[derive(Debug, Default)]
pub struct PlatformFactory;

impl PlatformFactory {
    /// Create a strategy for the given destination.
    pub fn create(platform: Platform, limits: &LimitsConfig) -> Arc<dyn PlatformStrategy> {
        match platform {
            Platform::Notion => Arc::new(NotionStrategy::new(limits)),
            Platform::Hashnode => Arc::new(HashnodeStrategy::new()),
            Platform::Twitter => Arc::new(TwitterStrategy::new(limits)),
            Platform::Linkedin => Arc::new(LinkedinStrategy::new(limits)),
        }
    }

    /// One strategy per supported destination.
    pub fn all(limits: &LimitsConfig) -> Vec<Arc<dyn PlatformStrategy>> {
        Platform::all()
            .into_iter()
            .map(|p| Self::create(p, limits))
            .collect()
    }
}
