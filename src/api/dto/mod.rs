//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `validator::Validate`; semantic checks (URL syntax,
//! slug format) stay in the application layer.

pub mod health;
pub mod shorten;
pub mod stats;
pub mod stats_list;
