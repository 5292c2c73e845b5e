//! In-process short link repository.

use async_trait::async_trait;
use std::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::StoreError;

/// Repository keeping links in memory, with the same uniqueness rules as the
/// Hasura schema.
///
/// # Use Cases
///
/// - Local development without a Hasura instance (`STORE_BACKEND=memory`)
/// - Integration tests of the HTTP layer
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    links: RwLock<Vec<ShortLink>>,
}

impl MemoryShortLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<ShortLink>> {
        self.links.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.read().iter().find(|l| l.slug == slug).cloned())
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.read().iter().find(|l| l.full_url == full_url).cloned())
    }

    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let mut links = self
            .links
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if links.iter().any(|l| l.slug == new_link.slug) {
            return Err(StoreError::Conflict(format!(
                "duplicate slug '{}'",
                new_link.slug
            )));
        }
        if links.iter().any(|l| l.full_url == new_link.full_url) {
            return Err(StoreError::Conflict(format!(
                "duplicate fullUrl '{}'",
                new_link.full_url
            )));
        }

        let link = ShortLink::from(new_link);
        links.push(link.clone());
        Ok(link)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
