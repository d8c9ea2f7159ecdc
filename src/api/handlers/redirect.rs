//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Responds with `302 Found` and a `Location` header. The click is recorded
/// before responding; a tracking failure does not affect the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown or its URL record expired.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.redirect_service.resolve(&slug).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
