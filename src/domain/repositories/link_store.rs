//! Store adapter contract for URL and statistics records.

use crate::domain::entities::StatsRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Errors raised by a [`LinkStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command failed: {0}")]
    Command(String),

    /// The stats hash was written but its expiry could not be set.
    /// The record now lives without a TTL until repaired.
    #[error("stats record for '{slug}' written without expiry: {reason}")]
    ExpiryNotSet { slug: String, reason: String },

    /// The requested expiry cannot be represented by the store.
    #[error("TTL of {0}s is out of range")]
    TtlOutOfRange(u64),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Remaining lifetime of a stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyExpiry {
    /// The key does not exist.
    Missing,
    /// The key exists and will never expire.
    Persistent,
    /// The key expires after this many seconds.
    ExpiresIn(u64),
}

/// A stats record found by [`LinkStore::scan_stats`], keyed by its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedStats {
    pub slug: String,
    pub fields: HashMap<String, String>,
}

/// Key-value store adapter holding both records of a slug.
///
/// Records live under two namespaced keys: `url:<slug>` (plain string with
/// expiry) and `stats:<slug>` (hash with expiry). The adapter is the only
/// component that reads or writes them.
///
/// Atomicity is per key and per field only. Multi-step operations
/// ([`set_stats`](Self::set_stats), [`increment_clicks`](Self::increment_clicks))
/// may be observed half-applied.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed adapter
/// - [`crate::infrastructure::store::MemoryStore`] - In-process adapter for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Checks whether the URL record for `slug` exists. Stats records are not consulted.
    async fn exists(&self, slug: &str) -> StoreResult<bool>;

    /// Writes the URL record unconditionally, replacing any existing value.
    async fn set_url(&self, slug: &str, original_url: &str, ttl: Duration) -> StoreResult<()>;

    /// Writes the URL record only if no record exists for `slug`.
    ///
    /// Returns `false` when the slug was already taken and nothing was written.
    async fn set_url_if_absent(
        &self,
        slug: &str,
        original_url: &str,
        ttl: Duration,
    ) -> StoreResult<bool>;

    /// Creates or overwrites the stats hash, then sets its expiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ExpiryNotSet`] if the hash was written but the
    /// expiry step failed.
    async fn set_stats(&self, slug: &str, record: &StatsRecord, ttl: Duration) -> StoreResult<()>;

    /// Returns the original URL, or `None` if the slug is unknown or expired.
    async fn get_url(&self, slug: &str) -> StoreResult<Option<String>>;

    /// Increments `click_count` by one, then updates `last_accessed`.
    ///
    /// Returns the new click count. The timestamp update is best-effort:
    /// if it fails the increment has still been applied.
    async fn increment_clicks(&self, slug: &str) -> StoreResult<i64>;

    /// Returns all fields of the stats hash, or an empty map if it does not exist.
    async fn get_stats(&self, slug: &str) -> StoreResult<HashMap<String, String>>;

    /// Enumerates every stats record in the store.
    ///
    /// Pagination of the underlying store is handled internally. Each call
    /// starts from scratch; ordering is unspecified.
    async fn scan_stats(&self) -> StoreResult<Vec<ScannedStats>>;

    /// Reports the remaining lifetime of the stats record.
    async fn stats_expiry(&self, slug: &str) -> StoreResult<KeyExpiry>;

    /// Sets the expiry of an existing stats record. Returns `false` if it does not exist.
    async fn expire_stats(&self, slug: &str, ttl: Duration) -> StoreResult<bool>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
