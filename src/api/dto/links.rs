//! DTOs for link creation and resolution.

use serde::{Deserialize, Serialize};

use crate::application::services::{CreateOutcome, CreatedLink};
use crate::domain::entities::ShortLink;

/// Body of `POST /url`.
///
/// Only the presence of `url` is checked. An empty `slug` is treated as
/// absent by the service.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Response of `POST /url`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub message: &'static str,
    #[serde(rename = "fullUrl")]
    pub full_url: String,
    pub slug: String,
}

impl CreateLinkResponse {
    pub const CREATED: &'static str = "Slug Created";
    pub const EXISTING: &'static str = "slug already exists.";
}

impl From<CreatedLink> for CreateLinkResponse {
    fn from(created: CreatedLink) -> Self {
        let message = match created.outcome {
            CreateOutcome::Created => Self::CREATED,
            CreateOutcome::Existing => Self::EXISTING,
        };

        Self {
            message,
            full_url: created.link.full_url,
            slug: created.link.slug,
        }
    }
}

/// Response of `GET /{slug}`: `{ "message": { "fullUrl": ... } }`.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub message: ResolvedUrl,
}

#[derive(Debug, Serialize)]
pub struct ResolvedUrl {
    #[serde(rename = "fullUrl")]
    pub full_url: String,
}

impl From<ShortLink> for ResolveResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            message: ResolvedUrl {
                full_url: link.full_url,
            },
        }
    }
}
