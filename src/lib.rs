//! # Hasura Shortener
//!
//! A small URL shortening service built with Axum on top of a Hasura
//! GraphQL store.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`ShortLink`](domain::entities::ShortLink) entity and repository trait
//! - **Application Layer** ([`application`]) - Slug resolution and creation logic
//! - **Infrastructure Layer** ([`infrastructure`]) - GraphQL client and repository implementations
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `GET /` - service description
//! - `GET /{slug}` - `{"message": {"fullUrl": ...}}` or 404 `{"message": "Not found"}`
//! - `POST /url` - `{"url": ..., "slug": ...?}` → `{"message", "fullUrl", "slug"}`
//! - `GET /health` - store connectivity
//!
//! ## Quick Start
//!
//! ```bash
//! export HASURA_ENDPOINT="https://my-project.hasura.app/v1/graphql"
//! export ADMIN_SECRET="..."
//! cargo run
//!
//! # or without a store
//! STORE_BACKEND=memory cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreateOutcome, CreatedLink, LinkService};
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::domain::repositories::ShortLinkRepository;
    pub use crate::error::{AppError, StoreError};
    pub use crate::infrastructure::persistence::MemoryShortLinkRepository;
    pub use crate::state::AppState;
}
