//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted slug to URL mapping
//! - [`NewShortLink`] - Insert input for a short link

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
