//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! - [`graphql`] - GraphQL client for the Hasura store
//! - [`persistence`] - Repository implementations

pub mod graphql;
pub mod persistence;
