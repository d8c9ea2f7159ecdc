//! Handler for a single slug's statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for one slug.
///
/// # Endpoint
///
/// `GET /api/stats/{slug}`
///
/// Statistics outlive the URL record, so an expired slug may still report here.
///
/// # Errors
///
/// Returns 404 Not Found if no stats record exists for the slug.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let summary = state.stats_service.get(&slug).await?;
    Ok(Json(summary.into()))
}
