//! Short link repository implementations.
//!
//! - [`HasuraShortLinkRepository`] - GraphQL store (production)
//! - [`MemoryShortLinkRepository`] - In-process store (development, tests)

pub mod hasura_short_link_repository;
pub mod memory_short_link_repository;

pub use hasura_short_link_repository::HasuraShortLinkRepository;
pub use memory_short_link_repository::MemoryShortLinkRepository;
