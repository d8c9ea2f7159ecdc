//! Redis-backed store adapter.

use super::keys::KeySpace;
use crate::domain::entities::StatsRecord;
use crate::domain::entities::stats::fields;
use crate::domain::repositories::{KeyExpiry, LinkStore, ScannedStats, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of keys requested per SCAN round-trip.
const SCAN_BATCH: usize = 100;

/// Store adapter on a Redis connection manager.
///
/// URL records are plain strings written with `SET ... EX`; stats records are
/// hashes written with `HSET` followed by `EXPIRE`. The connection manager
/// reconnects transparently; commands issued while Redis is down fail with
/// [`StoreError::Connection`].
pub struct RedisStore {
    conn: ConnectionManager,
    keys: KeySpace,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, keys: KeySpace) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            conn: manager,
            keys,
        };
        store.ping().await?;

        info!("✓ Connected to Redis");
        Ok(store)
    }
}

/// Converts a TTL to the signed seconds `EXPIRE` takes.
///
/// A wrapped cast would reach Redis as a negative TTL and delete the key.
fn expire_secs(ttl: Duration) -> StoreResult<i64> {
    let secs = ttl.as_secs();
    i64::try_from(secs).map_err(|_| StoreError::TtlOutOfRange(secs))
}

fn store_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

#[async_trait]
impl LinkStore for RedisStore {
    async fn exists(&self, slug: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(self.keys.url_key(slug))
            .await
            .map_err(store_error)
    }

    async fn set_url(&self, slug: &str, original_url: &str, ttl: Duration) -> StoreResult<()> {
        expire_secs(ttl)?;
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.keys.url_key(slug), original_url, ttl.as_secs())
            .await
            .map_err(store_error)?;

        debug!(slug, ttl_secs = ttl.as_secs(), "URL record written");
        Ok(())
    }

    async fn set_url_if_absent(
        &self,
        slug: &str,
        original_url: &str,
        ttl: Duration,
    ) -> StoreResult<bool> {
        let secs = expire_secs(ttl)?;
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(self.keys.url_key(slug))
            .arg(original_url)
            .arg("NX")
            .arg("EX")
            .arg(secs)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;

        let written = reply.is_some();
        debug!(slug, written, "Conditional URL write");
        Ok(written)
    }

    async fn set_stats(&self, slug: &str, record: &StatsRecord, ttl: Duration) -> StoreResult<()> {
        let secs = expire_secs(ttl)?;
        let key = self.keys.stats_key(slug);
        let mut conn = self.conn.clone();

        let items = record.to_fields();
        conn.hset_multiple::<_, _, _, ()>(&key, &items[..])
            .await
            .map_err(store_error)?;

        let applied = conn
            .expire::<_, bool>(&key, secs)
            .await
            .map_err(|e| StoreError::ExpiryNotSet {
                slug: slug.to_string(),
                reason: e.to_string(),
            })?;

        if !applied {
            return Err(StoreError::ExpiryNotSet {
                slug: slug.to_string(),
                reason: "key disappeared before EXPIRE".to_string(),
            });
        }

        Ok(())
    }

    async fn get_url(&self, slug: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(self.keys.url_key(slug))
            .await
            .map_err(store_error)
    }

    async fn increment_clicks(&self, slug: &str) -> StoreResult<i64> {
        let key = self.keys.stats_key(slug);
        let mut conn = self.conn.clone();

        let count = conn
            .hincr::<_, _, _, i64>(&key, fields::CLICK_COUNT, 1)
            .await
            .map_err(store_error)?;

        let now = chrono::Utc::now().timestamp();
        if let Err(e) = conn
            .hset::<_, _, _, ()>(&key, fields::LAST_ACCESSED, now)
            .await
        {
            warn!(slug, error = %e, "Failed to update last_accessed");
        }

        Ok(count)
    }

    async fn get_stats(&self, slug: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        conn.hgetall::<_, HashMap<String, String>>(self.keys.stats_key(slug))
            .await
            .map_err(store_error)
    }

    async fn scan_stats(&self) -> StoreResult<Vec<ScannedStats>> {
        let pattern = self.keys.stats_pattern();
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(store_error)?;

            for key in keys {
                // SCAN may return a key more than once.
                if !seen.insert(key.clone()) {
                    continue;
                }
                let Some(slug) = self.keys.slug_from_stats_key(&key) else {
                    continue;
                };

                match conn.hgetall::<_, HashMap<String, String>>(&key).await {
                    Ok(fields) if fields.is_empty() => {
                        debug!(slug, "Stats record expired during scan");
                    }
                    Ok(fields) => records.push(ScannedStats {
                        slug: slug.to_string(),
                        fields,
                    }),
                    Err(e) => warn!(slug, error = %e, "Skipping unreadable stats record"),
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(records)
    }

    async fn stats_expiry(&self, slug: &str) -> StoreResult<KeyExpiry> {
        let mut conn = self.conn.clone();
        let ttl = conn
            .ttl::<_, i64>(self.keys.stats_key(slug))
            .await
            .map_err(store_error)?;

        Ok(match ttl {
            -2 => KeyExpiry::Missing,
            -1 => KeyExpiry::Persistent,
            secs => KeyExpiry::ExpiresIn(secs.max(0) as u64),
        })
    }

    async fn expire_stats(&self, slug: &str, ttl: Duration) -> StoreResult<bool> {
        let secs = expire_secs(ttl)?;
        let mut conn = self.conn.clone();
        conn.expire::<_, bool>(self.keys.stats_key(slug), secs)
            .await
            .map_err(store_error)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))
    }
}
