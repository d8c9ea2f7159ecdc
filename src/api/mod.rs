//! REST API layer for HTTP request/response handling.
//!
//! Handlers translate HTTP requests into service calls and map
//! [`crate::domain::errors::ShortenError`] onto the JSON error envelope.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
