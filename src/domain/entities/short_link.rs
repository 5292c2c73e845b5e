//! ShortLink entity pairing a slug with its original URL.

use serde::{Deserialize, Serialize};

/// A persisted short link.
///
/// Field names follow the store schema, so the same type decodes GraphQL
/// rows and serializes into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub slug: String,
    #[serde(rename = "fullUrl")]
    pub full_url: String,
}

impl ShortLink {
    pub fn new(slug: impl Into<String>, full_url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            full_url: full_url.into(),
        }
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewShortLink {
    pub slug: String,
    #[serde(rename = "fullUrl")]
    pub full_url: String,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        Self {
            slug: new_link.slug,
            full_url: new_link.full_url,
        }
    }
}
