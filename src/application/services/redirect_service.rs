//! Slug resolution for redirects.

use std::sync::Arc;

use crate::domain::errors::ShortenError;
use crate::domain::repositories::LinkStore;
use tracing::{debug, warn};

/// Service consulted on every redirect request.
pub struct RedirectService {
    store: Arc<dyn LinkStore>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Resolves a slug to its original URL and records the click.
    ///
    /// Click tracking runs inline but never fails the redirect: tracking
    /// errors are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] for unknown or expired slugs and
    /// [`ShortenError::StoreUnavailable`] if the URL lookup itself fails.
    pub async fn resolve(&self, slug: &str) -> Result<String, ShortenError> {
        let original_url = self
            .store
            .get_url(slug)
            .await?
            .ok_or_else(|| ShortenError::NotFound(slug.to_string()))?;

        match self.store.increment_clicks(slug).await {
            Ok(clicks) => debug!(slug, clicks, "Click recorded"),
            Err(e) => {
                metrics::counter!("shortener_click_tracking_failures_total").increment(1);
                warn!(slug, error = %e, "Failed to increment click count");
            }
        }

        Ok(original_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkStore, StoreError};

    #[tokio::test]
    async fn test_resolve_known_slug() {
        let mut store = MockLinkStore::new();

        store
            .expect_get_url()
            .withf(|slug| slug == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_increment_clicks()
            .withf(|slug| slug == "abc123")
            .times(1)
            .returning(|_| Ok(1));

        let service = RedirectService::new(Arc::new(store));

        assert_eq!(
            service.resolve("abc123").await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_slug() {
        let mut store = MockLinkStore::new();

        store.expect_get_url().times(1).returning(|_| Ok(None));
        store.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(store));
        let result = service.resolve("missing").await;

        assert!(matches!(result, Err(ShortenError::NotFound(s)) if s == "missing"));
    }

    #[tokio::test]
    async fn test_resolve_swallows_tracking_failure() {
        let mut store = MockLinkStore::new();

        store
            .expect_get_url()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        store
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(StoreError::Command("READONLY".to_string())));

        let service = RedirectService::new(Arc::new(store));

        assert_eq!(
            service.resolve("abc123").await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure_is_surfaced() {
        let mut store = MockLinkStore::new();

        store
            .expect_get_url()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let service = RedirectService::new(Arc::new(store));
        let result = service.resolve("abc123").await;

        assert!(matches!(result, Err(ShortenError::StoreUnavailable(_))));
    }
}
