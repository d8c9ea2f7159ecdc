#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use kv_shortener::application::services::LinkSettings;
use kv_shortener::domain::entities::StatsRecord;
use kv_shortener::domain::repositories::LinkStore;
use kv_shortener::infrastructure::store::{KeySpace, MemoryStore};
use kv_shortener::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

const DAY: u64 = 24 * 60 * 60;

pub fn test_settings() -> LinkSettings {
    LinkSettings {
        base_url: BASE_URL.to_string(),
        slug_min_length: 4,
        slug_max_length: 6,
        url_ttl: Duration::from_secs(30 * DAY),
        stats_ttl: Duration::from_secs(90 * DAY),
        conditional_writes: true,
    }
}

/// Builds a state over a fresh in-memory store and returns the store for direct inspection.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(KeySpace::default()));
    let state = AppState::new(store.clone(), test_settings());
    (state, store)
}

/// Writes a URL record and its stats record the way allocation does.
pub async fn create_test_link(store: &MemoryStore, slug: &str, url: &str) {
    let settings = test_settings();
    store.set_url(slug, url, settings.url_ttl).await.unwrap();
    store
        .set_stats(slug, &StatsRecord::new(url, 1_700_000_000), settings.stats_ttl)
        .await
        .unwrap();
}
