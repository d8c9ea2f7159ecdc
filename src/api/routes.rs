//! API route configuration.

use crate::api::handlers::{
    create_handler, create_via_query_handler, health_handler, stats_handler, stats_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /create`        - Allocate a slug (JSON body)
/// - `GET  /create`        - Allocate a slug (query string)
/// - `GET  /stats`         - Statistics for every slug
/// - `GET  /stats/{slug}`  - Statistics for one slug
/// - `GET  /health`        - Store connectivity probe
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create",
            post(create_handler).get(create_via_query_handler),
        )
        .route("/stats", get(stats_list_handler))
        .route("/stats/{slug}", get(stats_handler))
        .route("/health", get(health_handler))
}
