//! Handlers for slug resolution and link creation.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::debug;

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Response
///
/// ```json
/// { "message": { "fullUrl": "https://example.com/a" } }
/// ```
///
/// # Errors
///
/// Returns 404 `{"message": "Not found"}` if the slug is unknown.
/// Returns 502 if the store cannot be queried.
pub async fn resolve_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    debug!(%slug, "Resolving slug");

    let link = state.link_service.resolve(&slug).await?;

    Ok(Json(link.into()))
}

/// Creates a short link, or returns the slug already assigned to the URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a", "slug": "custom1" }
/// ```
///
/// `slug` is optional; without it an 8-character slug is generated.
///
/// # Response
///
/// ```json
/// { "message": "Slug Created", "fullUrl": "https://example.com/a", "slug": "custom1" }
/// ```
///
/// `message` is `"slug already exists."` when the URL was already shortened.
///
/// # Errors
///
/// Returns 400 if the body is not JSON or has no `url`, or the slug is reserved.
/// Returns 409 if the custom slug belongs to another URL.
/// Returns 502 if the store cannot be reached.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Json(request) = payload?;

    let created = state
        .link_service
        .create(request.url, request.slug)
        .await?;

    Ok(Json(created.into()))
}
