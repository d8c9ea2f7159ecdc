//! DTOs for the slug allocation endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;

/// JSON body of `POST /api/create`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Destination URL, stored exactly as submitted.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,

    /// Desired slug. Absent or empty means a random slug is generated.
    pub slug: Option<String>,
}

/// Query string of `GET /api/create`.
///
/// A missing `url` is reported by the handler in the JSON error envelope.
#[derive(Debug, Deserialize)]
pub struct CreateUrlQuery {
    pub url: Option<String>,

    pub slug: Option<String>,
}

/// A freshly allocated short link. Timestamps are Unix seconds.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    pub original_url: String,
    pub short_url: String,
    pub slug: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub click_count: i64,
    pub is_custom_slug: bool,
    pub last_accessed: i64,
}

impl From<ShortLink> for ShortLinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            original_url: link.original_url,
            short_url: link.short_url,
            slug: link.slug,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_count: link.click_count,
            is_custom_slug: link.is_custom_slug,
            last_accessed: link.last_accessed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_fails_validation() {
        let req = CreateUrlRequest {
            url: String::new(),
            slug: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_slug_is_optional() {
        let req: CreateUrlRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert!(req.slug.is_none());
        assert!(req.validate().is_ok());
    }
}
