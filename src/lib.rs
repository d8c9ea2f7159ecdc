//! # kv-shortener
//!
//! A URL shortener backed by a TTL key-value store. Slugs are random or
//! caller-chosen, expire with their URL record, and keep click statistics
//! for a longer, independent window.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the [`domain::repositories::LinkStore`] contract, core errors
//! - **Application Layer** ([`application`]) - Slug allocation, redirect resolution, stats reporting
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory store adapters
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Storage Layout
//!
//! ```text
//! url:<slug>    string  original URL          TTL = URL_TTL_SECONDS
//! stats:<slug>  hash    original_url,         TTL = STATS_TTL_SECONDS
//!                       created_at,
//!                       last_accessed,
//!                       click_count
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! cargo run
//!
//! curl -X POST localhost:8080/api/create -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for integration tests and the admin CLI.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService, StatsService};
    pub use crate::domain::entities::{ShortLink, StatsSummary};
    pub use crate::domain::errors::ShortenError;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
