//! DTO for the service info endpoint.

use serde::Serialize;

/// Fixed description served at `GET /`.
pub const INFO_MESSAGE: &str = "This is a Url Shortner using Rust and Hasura.";

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: &'static str,
}
