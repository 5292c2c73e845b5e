//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::StoreError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// The backing store is expected to enforce uniqueness of both `slug` and
/// `fullUrl`; [`ShortLinkRepository::create`] reports a violation as
/// [`StoreError::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::HasuraShortLinkRepository`] - GraphQL store
/// - [`crate::infrastructure::persistence::MemoryShortLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Finds the first link whose slug equals `slug`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store cannot be queried.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Finds the first link whose original URL equals `full_url`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the store cannot be queried.
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the slug or the URL already exists.
    /// Returns other [`StoreError`] variants on store failures.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Returns true if the store is reachable.
    async fn health_check(&self) -> bool;
}
