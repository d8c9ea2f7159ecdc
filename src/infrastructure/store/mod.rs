//! Key-value store adapters for URL and stats records.
//!
//! Provides two [`crate::domain::repositories::LinkStore`] implementations:
//! - [`RedisStore`] - Production Redis-backed adapter
//! - [`MemoryStore`] - In-process adapter for tests and local runs without Redis

mod keys;
mod memory_store;
mod redis_store;

pub use keys::KeySpace;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
