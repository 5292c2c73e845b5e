//! Utility functions shared by the service layer.
//!
//! - [`slug_generator`] - Random slug generation and reserved-slug checks

pub mod slug_generator;
