//! Short link creation and resolution service.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::{AppError, StoreError};
use crate::utils::slug_generator::{ensure_not_reserved, generate_slug};

/// Attempts made to find a free random slug before giving up.
const MAX_SLUG_ATTEMPTS: usize = 10;

/// Whether [`LinkService::create`] inserted a record or reused one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Existing,
}

/// Result of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub link: ShortLink,
    pub outcome: CreateOutcome,
}

/// Result of a single insert attempt.
enum InsertAttempt {
    Created(ShortLink),
    Existing(ShortLink),
    SlugTaken,
}

/// Service for creating and resolving short links.
///
/// The URL is looked up before every insert. A constraint violation from a
/// store that enforces uniqueness is resolved by looking the URL up again.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
}

impl LinkService {
    /// Creates a new link service over the given repository.
    pub fn new(repository: Arc<dyn ShortLinkRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a slug to its short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this slug.
    /// Returns [`AppError::Store`] if the store cannot be queried.
    pub async fn resolve(&self, slug: &str) -> Result<ShortLink, AppError> {
        let found = self.repository.find_by_slug(slug).await.inspect_err(|_| {
            metrics::counter!("shortlinks_resolved_total", "result" => "error").increment(1);
        })?;

        match found {
            Some(link) => {
                metrics::counter!("shortlinks_resolved_total", "result" => "hit").increment(1);
                Ok(link)
            }
            None => {
                metrics::counter!("shortlinks_resolved_total", "result" => "miss").increment(1);
                Err(AppError::not_found("Not found", Value::Null))
            }
        }
    }

    /// Creates a short link for `full_url`, or returns the existing one.
    ///
    /// # Slug Selection
    ///
    /// - A non-empty caller-supplied `slug` is used verbatim (only reserved slugs are rejected)
    /// - Otherwise a random slug is generated, retrying on collision up to 10 times
    ///
    /// If the URL is already shortened the existing record is returned and the
    /// candidate slug is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a reserved custom slug.
    /// Returns [`AppError::Conflict`] if a custom slug belongs to another URL.
    /// Returns [`AppError::Internal`] if no free random slug was found.
    /// Returns [`AppError::Store`] on store failures.
    pub async fn create(
        &self,
        full_url: String,
        slug: Option<String>,
    ) -> Result<CreatedLink, AppError> {
        let slug = slug.filter(|s| !s.is_empty());
        if let Some(custom) = &slug {
            ensure_not_reserved(custom)?;
        }

        if let Some(existing) = self.repository.find_by_full_url(&full_url).await? {
            return Ok(Self::existing(existing));
        }

        if let Some(custom) = slug {
            return match self.try_insert(&full_url, custom.clone()).await? {
                InsertAttempt::Created(link) => Ok(Self::created(link)),
                InsertAttempt::Existing(link) => Ok(Self::existing(link)),
                InsertAttempt::SlugTaken => Err(AppError::conflict(
                    "Slug already in use",
                    json!({ "slug": custom }),
                )),
            };
        }

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            match self.try_insert(&full_url, generate_slug()).await? {
                InsertAttempt::Created(link) => return Ok(Self::created(link)),
                InsertAttempt::Existing(link) => return Ok(Self::existing(link)),
                InsertAttempt::SlugTaken => {
                    debug!(attempt, "Generated slug collided, retrying");
                }
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Returns true if the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    async fn try_insert(&self, full_url: &str, slug: String) -> Result<InsertAttempt, AppError> {
        let new_link = NewShortLink {
            slug,
            full_url: full_url.to_string(),
        };

        match self.repository.create(new_link).await {
            Ok(link) => Ok(InsertAttempt::Created(link)),
            Err(StoreError::Conflict(reason)) => {
                debug!(%reason, "Insert rejected by uniqueness constraint");

                // Another request may have shortened the same URL since the lookup.
                match self.repository.find_by_full_url(full_url).await? {
                    Some(existing) => Ok(InsertAttempt::Existing(existing)),
                    None => Ok(InsertAttempt::SlugTaken),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn created(link: ShortLink) -> CreatedLink {
        info!(slug = %link.slug, "Short link created");
        metrics::counter!("shortlinks_created_total").increment(1);
        CreatedLink {
            link,
            outcome: CreateOutcome::Created,
        }
    }

    fn existing(link: ShortLink) -> CreatedLink {
        debug!(slug = %link.slug, "URL already shortened");
        metrics::counter!("shortlinks_reused_total").increment(1);
        CreatedLink {
            link,
            outcome: CreateOutcome::Existing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortLinkRepository;
    use crate::utils::slug_generator::SLUG_LENGTH;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(mock: MockShortLinkRepository) -> LinkService {
        LinkService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_slug()
            .withf(|slug| slug == "abc12345")
            .times(1)
            .returning(|_| Ok(Some(ShortLink::new("abc12345", "https://example.com/a"))));

        let link = service(mock).resolve("abc12345").await.unwrap();

        assert_eq!(link.full_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_slug().times(1).returning(|_| Ok(None));

        let result = service(mock).resolve("does-not-exist").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_not_a_miss() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_slug()
            .times(1)
            .returning(|_| Err(StoreError::Transport("connection refused".to_string())));

        let result = service(mock).resolve("abc12345").await;

        assert!(matches!(result.unwrap_err(), AppError::Store { .. }));
    }

    #[tokio::test]
    async fn test_create_with_generated_slug() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create()
            .withf(|new_link| {
                new_link.full_url == "https://example.com/a" && new_link.slug.len() == SLUG_LENGTH
            })
            .times(1)
            .returning(|new_link| Ok(new_link.into()));

        let created = service(mock)
            .create("https://example.com/a".to_string(), None)
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Created);
        assert_eq!(created.link.slug.len(), SLUG_LENGTH);
        assert_eq!(created.link.full_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_create_with_empty_slug_generates_one() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create()
            .withf(|new_link| new_link.slug.len() == SLUG_LENGTH)
            .times(1)
            .returning(|new_link| Ok(new_link.into()));

        let created = service(mock)
            .create("https://e.test".to_string(), Some(String::new()))
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Created);
        assert_eq!(created.link.slug.len(), SLUG_LENGTH);
    }

    #[tokio::test]
    async fn test_create_with_custom_slug() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create()
            .withf(|new_link| new_link.slug == "custom1")
            .times(1)
            .returning(|new_link| Ok(new_link.into()));

        let created = service(mock)
            .create("https://x.test".to_string(), Some("custom1".to_string()))
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Created);
        assert_eq!(created.link.slug, "custom1");
    }

    #[tokio::test]
    async fn test_create_reuses_existing_slug_without_inserting() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(Some(ShortLink::new("existing", "https://example.com"))));
        mock.expect_create().times(0);

        let created = service(mock)
            .create("https://example.com".to_string(), Some("other".to_string()))
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Existing);
        assert_eq!(created.link.slug, "existing");
    }

    #[tokio::test]
    async fn test_create_resolves_concurrent_insert_of_same_url() {
        let mut mock = MockShortLinkRepository::new();
        let lookups = Arc::new(AtomicUsize::new(0));
        let seen = lookups.clone();
        mock.expect_find_by_full_url()
            .times(2)
            .returning(move |url| {
                if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(None)
                } else {
                    Ok(Some(ShortLink::new("winner", url)))
                }
            });
        mock.expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Conflict("fullUrls_fullUrl_key".to_string())));

        let created = service(mock)
            .create("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Existing);
        assert_eq!(created.link.slug, "winner");
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_custom_slug_taken_by_other_url() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .times(2)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Conflict("fullUrls_slug_key".to_string())));

        let result = service(mock)
            .create("https://example.com".to_string(), Some("taken".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_retries_generated_slug_collision() {
        let mut mock = MockShortLinkRepository::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        mock.expect_create().times(2).returning(move |new_link| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(StoreError::Conflict("fullUrls_slug_key".to_string()))
            } else {
                Ok(new_link.into())
            }
        });
        mock.expect_find_by_full_url()
            .times(2)
            .returning(|_| Ok(None));

        let created = service(mock)
            .create("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(created.outcome, CreateOutcome::Created);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_create()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(|_| Err(StoreError::Conflict("fullUrls_slug_key".to_string())));
        mock.expect_find_by_full_url()
            .times(MAX_SLUG_ATTEMPTS + 1)
            .returning(|_| Ok(None));

        let result = service(mock)
            .create("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_lookup_failure_is_reported() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .times(1)
            .returning(|_| Err(StoreError::Transport("connection refused".to_string())));
        mock.expect_create().times(0);

        let result = service(mock)
            .create("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Store { .. }));
    }

    #[tokio::test]
    async fn test_create_insert_failure_is_reported() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create().times(1).returning(|_| {
            Err(StoreError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let result = service(mock)
            .create("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Store { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_reserved_slug() {
        let mut mock = MockShortLinkRepository::new();
        mock.expect_find_by_full_url().times(0);
        mock.expect_create().times(0);

        let result = service(mock)
            .create("https://example.com".to_string(), Some("health".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
