//! Handlers for slug allocation.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{CreateUrlQuery, CreateUrlRequest, ShortLinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a slug for a destination URL.
///
/// # Endpoint
///
/// `POST /api/create`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "slug": "abc123" }
/// ```
///
/// `slug` is optional; when absent or empty a random slug is generated.
///
/// # Response
///
/// `201 Created` with the allocated record:
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_url": "http://localhost:8080/abc123",
///   "slug": "abc123",
///   "created_at": 1700000000,
///   "expires_at": 1702592000,
///   "click_count": 0,
///   "is_custom_slug": true,
///   "last_accessed": 1700000000
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL or slug format
/// - 409 if the desired slug is taken
/// - 500 if random generation is exhausted or the store fails
pub async fn create_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    allocate(&state, payload).await
}

/// Query-string form of [`create_handler`].
///
/// # Endpoint
///
/// `GET /api/create?url=<url>&slug=<slug>`
///
/// # Errors
///
/// Same as [`create_handler`], plus 400 when `url` is missing.
pub async fn create_via_query_handler(
    State(state): State<AppState>,
    Query(query): Query<CreateUrlQuery>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    let url = query.url.ok_or_else(|| {
        AppError::bad_request(
            "URL parameter is required",
            json!({ "fields": { "url": ["required"] } }),
        )
    })?;

    let payload = CreateUrlRequest {
        url,
        slug: query.slug,
    };
    allocate(&state, payload).await
}

async fn allocate(
    state: &AppState,
    payload: CreateUrlRequest,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .allocate(&payload.url, payload.slug.as_deref())
        .await?;

    tracing::info!(slug = %link.slug, custom = link.is_custom_slug, "Short link created");

    Ok((StatusCode::CREATED, Json(link.into())))
}
