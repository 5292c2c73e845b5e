//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization. Field names match the public
//! wire format (`fullUrl`, `slug`, `message`).

pub mod health;
pub mod info;
pub mod links;
