//! HTTP request handlers for API endpoints.

pub mod health;
pub mod info;
pub mod links;

pub use health::health_handler;
pub use info::info_handler;
pub use links::{create_link_handler, resolve_handler};
