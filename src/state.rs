//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::ShortLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Builds state around a single store handle shared by all requests.
    pub fn new(repository: Arc<dyn ShortLinkRepository>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
        }
    }
}
