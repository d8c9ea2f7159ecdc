//! In-process store adapter with TTL semantics.

use super::keys::KeySpace;
use crate::domain::entities::StatsRecord;
use crate::domain::entities::stats::fields;
use crate::domain::repositories::{KeyExpiry, LinkStore, ScannedStats, StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// A stored value with an optional deadline.
#[derive(Debug, Clone)]
struct Expiring<T> {
    value: T,
    expires_at: Option<Instant>,
}

/// Deadline `ttl` from `now`, or an error if the clock cannot represent it.
fn deadline(now: Instant, ttl: Duration) -> StoreResult<Instant> {
    now.checked_add(ttl).ok_or(StoreError::TtlOutOfRange(ttl.as_secs()))
}

impl<T> Expiring<T> {
    fn with_ttl(value: T, ttl: Duration) -> StoreResult<Self> {
        Ok(Self {
            value,
            expires_at: Some(deadline(Instant::now(), ttl)?),
        })
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Store adapter keeping both record kinds in concurrent maps.
///
/// Mirrors the Redis adapter: expired entries are invisible and removed
/// lazily on access, and incrementing clicks on a missing stats record
/// creates one without an expiry. Time comes from [`tokio::time::Instant`],
/// so tests can drive expiry with a paused clock.
pub struct MemoryStore {
    keys: KeySpace,
    urls: DashMap<String, Expiring<String>>,
    stats: DashMap<String, Expiring<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new(keys: KeySpace) -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self {
            keys,
            urls: DashMap::new(),
            stats: DashMap::new(),
        }
    }

    fn live_url(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        match self.urls.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }
        self.urls.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    fn live_stats(&self, key: &str) -> Option<Expiring<HashMap<String, String>>> {
        let now = Instant::now();
        match self.stats.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.clone()),
            Some(_) => {}
            None => return None,
        }
        self.stats.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(KeySpace::default())
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn exists(&self, slug: &str) -> StoreResult<bool> {
        Ok(self.live_url(&self.keys.url_key(slug)).is_some())
    }

    async fn set_url(&self, slug: &str, original_url: &str, ttl: Duration) -> StoreResult<()> {
        self.urls.insert(
            self.keys.url_key(slug),
            Expiring::with_ttl(original_url.to_string(), ttl)?,
        );
        Ok(())
    }

    async fn set_url_if_absent(
        &self,
        slug: &str,
        original_url: &str,
        ttl: Duration,
    ) -> StoreResult<bool> {
        let now = Instant::now();
        let value = Expiring::with_ttl(original_url.to_string(), ttl)?;

        match self.urls.entry(self.keys.url_key(slug)) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    return Ok(false);
                }
                occupied.insert(value);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
        Ok(true)
    }

    async fn set_stats(&self, slug: &str, record: &StatsRecord, ttl: Duration) -> StoreResult<()> {
        let fields = record
            .to_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        self.stats
            .insert(self.keys.stats_key(slug), Expiring::with_ttl(fields, ttl)?);
        Ok(())
    }

    async fn get_url(&self, slug: &str) -> StoreResult<Option<String>> {
        Ok(self.live_url(&self.keys.url_key(slug)))
    }

    async fn increment_clicks(&self, slug: &str) -> StoreResult<i64> {
        let now = Instant::now();
        let mut entry = self
            .stats
            .entry(self.keys.stats_key(slug))
            .or_insert_with(|| Expiring {
                value: HashMap::new(),
                expires_at: None,
            });

        if !entry.is_live(now) {
            *entry = Expiring {
                value: HashMap::new(),
                expires_at: None,
            };
        }

        let count = entry
            .value
            .get(fields::CLICK_COUNT)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;

        entry
            .value
            .insert(fields::CLICK_COUNT.to_string(), count.to_string());
        entry.value.insert(
            fields::LAST_ACCESSED.to_string(),
            chrono::Utc::now().timestamp().to_string(),
        );

        Ok(count)
    }

    async fn get_stats(&self, slug: &str) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .live_stats(&self.keys.stats_key(slug))
            .map(|entry| entry.value)
            .unwrap_or_default())
    }

    async fn scan_stats(&self) -> StoreResult<Vec<ScannedStats>> {
        let now = Instant::now();
        Ok(self
            .stats
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .filter_map(|entry| {
                let slug = self.keys.slug_from_stats_key(entry.key())?;
                Some(ScannedStats {
                    slug: slug.to_string(),
                    fields: entry.value().value.clone(),
                })
            })
            .collect())
    }

    async fn stats_expiry(&self, slug: &str) -> StoreResult<KeyExpiry> {
        let now = Instant::now();
        Ok(match self.live_stats(&self.keys.stats_key(slug)) {
            None => KeyExpiry::Missing,
            Some(Expiring {
                expires_at: None, ..
            }) => KeyExpiry::Persistent,
            Some(Expiring {
                expires_at: Some(at),
                ..
            }) => KeyExpiry::ExpiresIn(at.saturating_duration_since(now).as_secs()),
        })
    }

    async fn expire_stats(&self, slug: &str, ttl: Duration) -> StoreResult<bool> {
        let now = Instant::now();
        let at = deadline(now, ttl)?;
        match self.stats.get_mut(&self.keys.stats_key(slug)) {
            Some(mut entry) if entry.is_live(now) => {
                entry.expires_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
