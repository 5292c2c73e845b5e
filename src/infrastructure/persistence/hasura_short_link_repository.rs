//! Hasura implementation of the short link repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::StoreError;
use crate::infrastructure::graphql::GraphQlClient;
use crate::infrastructure::graphql::operations::{
    FIND_BY_FULL_URL, FIND_BY_SLUG, FullUrlVariables, FullUrlsData, INSERT_ONE, InsertOneData,
    NoVariables, PING, PingData, SlugVariables,
};

/// Repository backed by the `fullUrls` table of a Hasura instance.
///
/// Expects unique constraints on both `slug` and `fullUrl`.
pub struct HasuraShortLinkRepository {
    client: Arc<GraphQlClient>,
}

impl HasuraShortLinkRepository {
    /// Creates a new repository over a shared GraphQL client.
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShortLinkRepository for HasuraShortLinkRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, StoreError> {
        let data: FullUrlsData = self
            .client
            .query(FIND_BY_SLUG, &SlugVariables { slug })
            .await?;

        Ok(data.full_urls.into_iter().next())
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<ShortLink>, StoreError> {
        let data: FullUrlsData = self
            .client
            .query(FIND_BY_FULL_URL, &FullUrlVariables { full_url })
            .await?;

        Ok(data.full_urls.into_iter().next())
    }

    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let data: InsertOneData = self.client.mutate(INSERT_ONE, &new_link).await?;

        data.inserted
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))
    }

    async fn health_check(&self) -> bool {
        match self.client.query::<_, PingData>(PING, &NoVariables {}).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, endpoint = self.client.endpoint(), "Store health check failed");
                false
            }
        }
    }
}
