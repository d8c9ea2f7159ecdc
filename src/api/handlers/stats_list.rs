//! Handler for the full statistics report.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::api::dto::stats_list::StatsListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists statistics for every slug in the store.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "total": 1,
///   "items": [
///     {
///       "slug": "abc123",
///       "original_url": "https://example.com",
///       "short_url": "http://localhost:8080/abc123",
///       "click_count": 10,
///       "created_at": 1700000000,
///       "last_accessed": 1700000500
///     }
///   ]
/// }
/// ```
///
/// The report is built by a full keyspace scan and is not paginated.
pub async fn stats_list_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsListResponse>, AppError> {
    let items: Vec<StatsResponse> = state
        .stats_service
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(StatsListResponse {
        total: items.len(),
        items,
    }))
}
