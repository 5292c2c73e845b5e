//! Handler for the service info endpoint.

use axum::Json;

use crate::api::dto::info::{INFO_MESSAGE, InfoResponse};

/// Describes the service.
///
/// # Endpoint
///
/// `GET /`
///
/// Never touches the store, so it answers even when the store is down.
pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: INFO_MESSAGE,
    })
}
