//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod stats_list;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::{create_handler, create_via_query_handler};
pub use stats::stats_handler;
pub use stats_list::stats_list_handler;
