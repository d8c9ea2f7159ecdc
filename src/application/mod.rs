//! Application layer services implementing business logic.
//!
//! Services coordinate the store adapter, slug utilities and business rules,
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Slug allocation (custom or random)
//! - [`services::redirect_service::RedirectService`] - Slug resolution with click tracking
//! - [`services::stats_service::StatsService`] - Statistics reporting

pub mod services;
