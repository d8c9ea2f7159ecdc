//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET /{slug}` - Redirect to the original URL
//! - `/api/*`      - Allocation, statistics and health (see [`crate::api::routes`])
//!
//! Trailing slashes are trimmed before routing, so `/abc123/` resolves like `/abc123`.

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{slug}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
