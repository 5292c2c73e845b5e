//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service description (never touches the store)
//! - `GET  /health`  - Health check: store connectivity
//! - `GET  /{slug}`  - Slug resolution
//! - `POST /url`     - Short link creation
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::public_routes()
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
