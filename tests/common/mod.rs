#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use axum_test::TestServer;
use hasura_shortener::domain::entities::{NewShortLink, ShortLink};
use hasura_shortener::domain::repositories::ShortLinkRepository;
use hasura_shortener::error::StoreError;
use hasura_shortener::infrastructure::persistence::MemoryShortLinkRepository;
use hasura_shortener::routes::app_router;
use hasura_shortener::state::AppState;
use std::sync::{Arc, Mutex};
use tower_http::normalize_path::NormalizePath;

/// Repository whose every call fails as if the store were down.
pub struct UnreachableRepository;

#[async_trait]
impl ShortLinkRepository for UnreachableRepository {
    async fn find_by_slug(&self, _slug: &str) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn find_by_full_url(&self, _full_url: &str) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn create(&self, _new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Store without unique constraints: every insert is appended.
#[derive(Default)]
pub struct UnconstrainedRepository {
    rows: Mutex<Vec<ShortLink>>,
}

impl UnconstrainedRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ShortLinkRepository for UnconstrainedRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|link| link.slug == slug).cloned())
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<ShortLink>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|link| link.full_url == full_url).cloned())
    }

    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let link = ShortLink::from(new_link);
        self.rows.lock().unwrap().push(link.clone());
        Ok(link)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Full application stack, including path normalization and tracing.
pub fn app(repository: Arc<dyn ShortLinkRepository>) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(AppState::new(repository)))
}

/// Server over a fresh in-memory store; the store is returned for inspection.
pub fn memory_server() -> (TestServer, Arc<MemoryShortLinkRepository>) {
    let repository = Arc::new(MemoryShortLinkRepository::new());
    let server = TestServer::new(app(repository.clone())).unwrap();
    (server, repository)
}

pub fn unconstrained_server() -> (TestServer, Arc<UnconstrainedRepository>) {
    let repository = Arc::new(UnconstrainedRepository::default());
    let server = TestServer::new(app(repository.clone())).unwrap();
    (server, repository)
}

pub fn unreachable_server() -> TestServer {
    TestServer::new(app(Arc::new(UnreachableRepository))).unwrap()
}

pub async fn seed(repository: &MemoryShortLinkRepository, slug: &str, url: &str) {
    repository
        .create(NewShortLink {
            slug: slug.to_string(),
            full_url: url.to_string(),
        })
        .await
        .unwrap();
}
