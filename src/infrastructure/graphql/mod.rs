//! GraphQL transport to the Hasura store.
//!
//! - [`client`] - HTTP client, envelope decoding and retry policy
//! - [`operations`] - Query/mutation documents and payload types

pub mod client;
pub mod operations;

pub use client::GraphQlClient;
