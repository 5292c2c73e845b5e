//! GraphQL documents and payload shapes for the `fullUrls` table.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;

pub const FIND_BY_SLUG: &str = r#"query ($slug: String) {
  fullUrls(where: {slug: {_eq: $slug}}) {
    slug
    fullUrl
  }
}"#;

pub const FIND_BY_FULL_URL: &str = r#"query ($fullUrl: String) {
  fullUrls(where: {fullUrl: {_eq: $fullUrl}}) {
    slug
    fullUrl
  }
}"#;

pub const INSERT_ONE: &str = r#"mutation ($fullUrl: String, $slug: String) {
  insert_fullUrls_one(object: {fullUrl: $fullUrl, slug: $slug}) {
    slug
    fullUrl
  }
}"#;

pub const PING: &str = "query { __typename }";

#[derive(Debug, Serialize)]
pub struct SlugVariables<'a> {
    pub slug: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FullUrlVariables<'a> {
    #[serde(rename = "fullUrl")]
    pub full_url: &'a str,
}

/// Variables for operations that take none.
#[derive(Debug, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Deserialize)]
pub struct FullUrlsData {
    #[serde(rename = "fullUrls")]
    pub full_urls: Vec<ShortLink>,
}

#[derive(Debug, Deserialize)]
pub struct InsertOneData {
    #[serde(rename = "insert_fullUrls_one")]
    pub inserted: Option<ShortLink>,
}

#[derive(Debug, Deserialize)]
pub struct PingData {
    #[serde(rename = "__typename")]
    pub typename: String,
}
