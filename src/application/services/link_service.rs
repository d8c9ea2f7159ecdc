//! Slug allocation service.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::{ShortLink, StatsRecord, build_short_url};
use crate::domain::errors::ShortenError;
use crate::domain::repositories::LinkStore;
use crate::utils::slug::{generate_slug, is_valid_slug};
use crate::utils::url_validator::validate_url;
use tracing::{debug, error, info, warn};

/// Attempts made to find a free random slug before giving up.
pub const MAX_SLUG_ATTEMPTS: usize = 10;

/// Settings consumed by slug allocation.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub base_url: String,
    pub slug_min_length: usize,
    pub slug_max_length: usize,
    pub url_ttl: Duration,
    pub stats_ttl: Duration,
    /// Use `SET NX` for the URL record instead of an unconditional write
    /// after the existence check.
    pub conditional_writes: bool,
}

impl From<&Config> for LinkSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            slug_min_length: config.slug_min_length,
            slug_max_length: config.slug_max_length,
            url_ttl: Duration::from_secs(config.url_ttl_seconds),
            stats_ttl: Duration::from_secs(config.stats_ttl_seconds),
            conditional_writes: config.conditional_writes,
        }
    }
}

/// Service allocating slugs for destination URLs.
///
/// Either validates a caller-chosen slug or draws random candidates until a
/// free one is found, then writes the URL record and its stats record.
///
/// # Consistency
///
/// The two writes are not transactional. When the stats write fails after
/// the URL write succeeded, the slug redirects normally but is missing from
/// statistics until it is allocated again. The failure is logged and the
/// allocation still succeeds; nothing is rolled back.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(store: Arc<dyn LinkStore>, settings: LinkSettings) -> Self {
        Self { store, settings }
    }

    /// Allocates a slug for `original_url`.
    ///
    /// A non-empty `desired_slug` is used verbatim if it passes validation and
    /// is free; otherwise a random slug is generated. The destination URL is
    /// stored exactly as given, so allocating the same URL twice yields two
    /// independent slugs.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidUrl`] if the URL lacks a scheme or host
    /// - [`ShortenError::InvalidSlugFormat`] if the custom slug breaks the syntax rules
    /// - [`ShortenError::SlugTaken`] if the custom slug is already in use
    /// - [`ShortenError::SlugExhausted`] if every random candidate collided
    /// - [`ShortenError::StoreUnavailable`] on store failures before the URL record is written
    pub async fn allocate(
        &self,
        original_url: &str,
        desired_slug: Option<&str>,
    ) -> Result<ShortLink, ShortenError> {
        validate_url(original_url).map_err(|e| ShortenError::InvalidUrl(e.to_string()))?;

        let (slug, is_custom_slug) = match desired_slug.filter(|s| !s.is_empty()) {
            Some(custom) => (self.claim_custom_slug(custom, original_url).await?, true),
            None => (self.claim_random_slug(original_url).await?, false),
        };

        let now = chrono::Utc::now().timestamp();
        let record = StatsRecord::new(original_url, now);

        if let Err(e) = self
            .store
            .set_stats(&slug, &record, self.settings.stats_ttl)
            .await
        {
            metrics::counter!("shortener_stats_write_failures_total").increment(1);
            error!(
                slug = %slug,
                error = %e,
                "Stats record not written; slug redirects but is missing from statistics"
            );
        }

        info!(slug = %slug, custom = is_custom_slug, "Slug allocated");

        Ok(ShortLink {
            short_url: build_short_url(&self.settings.base_url, &slug),
            slug,
            original_url: original_url.to_string(),
            created_at: now,
            expires_at: now.saturating_add(
                i64::try_from(self.settings.url_ttl.as_secs()).unwrap_or(i64::MAX),
            ),
            last_accessed: now,
            click_count: 0,
            is_custom_slug,
        })
    }

    /// Validates and writes a caller-chosen slug.
    async fn claim_custom_slug(
        &self,
        slug: &str,
        original_url: &str,
    ) -> Result<String, ShortenError> {
        if !is_valid_slug(slug) {
            return Err(ShortenError::InvalidSlugFormat(slug.to_string()));
        }

        if self.store.exists(slug).await? {
            return Err(ShortenError::SlugTaken(slug.to_string()));
        }

        if !self.write_url(slug, original_url).await? {
            debug!(slug, "Custom slug claimed concurrently");
            return Err(ShortenError::SlugTaken(slug.to_string()));
        }

        Ok(slug.to_string())
    }

    /// Draws random candidates until one can be written.
    ///
    /// Makes at most [`MAX_SLUG_ATTEMPTS`] attempts without backoff. A lost
    /// conditional write counts as a collision.
    async fn claim_random_slug(&self, original_url: &str) -> Result<String, ShortenError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate =
                generate_slug(self.settings.slug_min_length, self.settings.slug_max_length);

            if !self.store.exists(&candidate).await?
                && self.write_url(&candidate, original_url).await?
            {
                return Ok(candidate);
            }

            metrics::counter!("shortener_slug_collisions_total").increment(1);
            debug!(attempt, candidate = %candidate, "Slug collision");
        }

        metrics::counter!("shortener_slug_exhausted_total").increment(1);
        warn!(
            attempts = MAX_SLUG_ATTEMPTS,
            "No free slug found; store may be misbehaving"
        );

        Err(ShortenError::SlugExhausted {
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }

    /// Writes the URL record. Returns `false` if a conditional write lost a race.
    async fn write_url(&self, slug: &str, original_url: &str) -> Result<bool, ShortenError> {
        let ttl = self.settings.url_ttl;

        if self.settings.conditional_writes {
            Ok(self.store.set_url_if_absent(slug, original_url, ttl).await?)
        } else {
            self.store.set_url(slug, original_url, ttl).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkStore, StoreError};

    fn settings() -> LinkSettings {
        LinkSettings {
            base_url: "http://localhost:8080".to_string(),
            slug_min_length: 4,
            slug_max_length: 6,
            url_ttl: Duration::from_secs(30 * 24 * 3600),
            stats_ttl: Duration::from_secs(90 * 24 * 3600),
            conditional_writes: true,
        }
    }

    fn service(store: MockLinkStore) -> LinkService {
        LinkService::new(Arc::new(store), settings())
    }

    #[tokio::test]
    async fn test_allocate_custom_slug_success() {
        let mut store = MockLinkStore::new();

        store
            .expect_exists()
            .withf(|slug| slug == "abc123")
            .times(1)
            .returning(|_| Ok(false));
        store
            .expect_set_url_if_absent()
            .withf(|slug, url, ttl| {
                slug == "abc123"
                    && url == "https://example.com"
                    && *ttl == Duration::from_secs(30 * 24 * 3600)
            })
            .times(1)
            .returning(|_, _, _| Ok(true));
        store
            .expect_set_stats()
            .withf(|slug, record, ttl| {
                slug == "abc123"
                    && record.click_count == 0
                    && record.created_at == record.last_accessed
                    && *ttl == Duration::from_secs(90 * 24 * 3600)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let link = service(store)
            .allocate("https://example.com", Some("abc123"))
            .await
            .unwrap();

        assert_eq!(link.slug, "abc123");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_url, "http://localhost:8080/abc123");
        assert_eq!(link.click_count, 0);
        assert!(link.is_custom_slug);
        assert_eq!(link.expires_at - link.created_at, 30 * 24 * 3600);
    }

    #[tokio::test]
    async fn test_allocate_invalid_url() {
        let store = MockLinkStore::new();

        let result = service(store).allocate("not a url", None).await;

        assert!(matches!(result, Err(ShortenError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_allocate_invalid_slug_format() {
        for bad in ["ab", "abcdefghijklmnopqrstu", "has space", "dot.ted", "sl@sh"] {
            let store = MockLinkStore::new();

            let result = service(store)
                .allocate("https://example.com", Some(bad))
                .await;

            assert!(
                matches!(result, Err(ShortenError::InvalidSlugFormat(_))),
                "slug {:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_allocate_custom_slug_taken_does_not_write() {
        let mut store = MockLinkStore::new();

        store.expect_exists().times(1).returning(|_| Ok(true));
        store.expect_set_url_if_absent().times(0);
        store.expect_set_url().times(0);
        store.expect_set_stats().times(0);

        let result = service(store)
            .allocate("https://other.com", Some("taken"))
            .await;

        assert!(matches!(result, Err(ShortenError::SlugTaken(s)) if s == "taken"));
    }

    #[tokio::test]
    async fn test_allocate_custom_slug_lost_race() {
        let mut store = MockLinkStore::new();

        store.expect_exists().times(1).returning(|_| Ok(false));
        store
            .expect_set_url_if_absent()
            .times(1)
            .returning(|_, _, _| Ok(false));
        store.expect_set_stats().times(0);

        let result = service(store)
            .allocate("https://example.com", Some("racy"))
            .await;

        assert!(matches!(result, Err(ShortenError::SlugTaken(_))));
    }

    #[tokio::test]
    async fn test_allocate_unconditional_write_when_disabled() {
        let mut store = MockLinkStore::new();

        store.expect_exists().times(1).returning(|_| Ok(false));
        store.expect_set_url_if_absent().times(0);
        store
            .expect_set_url()
            .withf(|slug, _, _| slug == "plain")
            .times(1)
            .returning(|_, _, _| Ok(()));
        store.expect_set_stats().times(1).returning(|_, _, _| Ok(()));

        let mut settings = settings();
        settings.conditional_writes = false;
        let service = LinkService::new(Arc::new(store), settings);

        let link = service
            .allocate("https://example.com", Some("plain"))
            .await
            .unwrap();

        assert_eq!(link.slug, "plain");
    }

    #[tokio::test]
    async fn test_allocate_empty_desired_slug_is_random() {
        let mut store = MockLinkStore::new();

        store.expect_exists().times(1).returning(|_| Ok(false));
        store
            .expect_set_url_if_absent()
            .times(1)
            .returning(|_, _, _| Ok(true));
        store.expect_set_stats().times(1).returning(|_, _, _| Ok(()));

        let link = service(store)
            .allocate("https://example.com", Some(""))
            .await
            .unwrap();

        assert!(!link.is_custom_slug);
        assert!((4..=6).contains(&link.slug.len()));
        assert!(link.slug.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_allocate_random_retries_on_collision() {
        let mut store = MockLinkStore::new();
        let mut calls = 0;

        store.expect_exists().times(4).returning(move |_| {
            calls += 1;
            Ok(calls <= 3)
        });
        store
            .expect_set_url_if_absent()
            .times(1)
            .returning(|_, _, _| Ok(true));
        store.expect_set_stats().times(1).returning(|_, _, _| Ok(()));

        let link = service(store)
            .allocate("https://example.com", None)
            .await
            .unwrap();

        assert!(!link.is_custom_slug);
    }

    #[tokio::test]
    async fn test_allocate_random_lost_conditional_write_counts_as_collision() {
        let mut store = MockLinkStore::new();
        let mut writes = 0;

        store.expect_exists().times(2).returning(|_| Ok(false));
        store
            .expect_set_url_if_absent()
            .times(2)
            .returning(move |_, _, _| {
                writes += 1;
                Ok(writes == 2)
            });
        store.expect_set_stats().times(1).returning(|_, _, _| Ok(()));

        assert!(
            service(store)
                .allocate("https://example.com", None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_allocate_random_exhausted_after_ten_attempts() {
        let mut store = MockLinkStore::new();

        store
            .expect_exists()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(|_| Ok(true));
        store.expect_set_url_if_absent().times(0);
        store.expect_set_stats().times(0);

        let result = service(store).allocate("https://example.com", None).await;

        let err = result.unwrap_err();
        assert!(matches!(err, ShortenError::SlugExhausted { attempts: 10 }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_allocate_store_failure_on_exists() {
        let mut store = MockLinkStore::new();

        store
            .expect_exists()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let result = service(store).allocate("https://example.com", None).await;

        assert!(matches!(result, Err(ShortenError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_allocate_stats_failure_is_not_fatal() {
        let mut store = MockLinkStore::new();

        store.expect_exists().times(1).returning(|_| Ok(false));
        store
            .expect_set_url_if_absent()
            .times(1)
            .returning(|_, _, _| Ok(true));
        store.expect_set_stats().times(1).returning(|slug, _, _| {
            Err(StoreError::ExpiryNotSet {
                slug: slug.to_string(),
                reason: "timeout".to_string(),
            })
        });

        let link = service(store)
            .allocate("https://example.com", Some("partial"))
            .await
            .unwrap();

        assert_eq!(link.slug, "partial");
    }

    #[tokio::test]
    async fn test_allocate_with_unrepresentable_ttls_does_not_panic() {
        use crate::infrastructure::store::MemoryStore;

        let store: Arc<dyn LinkStore> = Arc::new(MemoryStore::default());

        let huge_stats = LinkService::new(
            store.clone(),
            LinkSettings {
                stats_ttl: Duration::from_secs(u64::MAX),
                ..settings()
            },
        );
        let link = huge_stats
            .allocate("https://example.com", Some("abc123"))
            .await
            .unwrap();
        assert!(link.expires_at > link.created_at);
        assert!(store.get_stats("abc123").await.unwrap().is_empty());

        let huge_url = LinkService::new(
            store.clone(),
            LinkSettings {
                url_ttl: Duration::from_secs(u64::MAX),
                ..settings()
            },
        );
        let result = huge_url.allocate("https://example.com", Some("xyz789")).await;
        assert!(matches!(result, Err(ShortenError::StoreUnavailable(_))));
        assert!(!store.exists("xyz789").await.unwrap());
    }
}
