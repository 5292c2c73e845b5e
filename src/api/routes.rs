//! API route configuration.

use crate::api::handlers::{create_link_handler, health_handler, info_handler, resolve_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public API routes.
///
/// # Endpoints
///
/// - `GET  /`        - Service description
/// - `GET  /health`  - Store connectivity check
/// - `GET  /{slug}`  - Resolve a slug to its URL
/// - `POST /url`     - Create a short link
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(info_handler))
        .route("/health", get(health_handler))
        .route("/url", post(create_link_handler))
        .route("/{slug}", get(resolve_handler))
}
