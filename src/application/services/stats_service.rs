//! Click statistics reporting service.

use std::sync::Arc;

use crate::domain::entities::{StatsRecord, StatsSummary, build_short_url};
use crate::domain::errors::ShortenError;
use crate::domain::repositories::LinkStore;

/// Service assembling stats records into reportable summaries.
///
/// Stats records outlive their URL records, so reports may include slugs
/// that no longer redirect.
pub struct StatsService {
    store: Arc<dyn LinkStore>,
    base_url: String,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(store: Arc<dyn LinkStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Returns a summary for every stats record in the store.
    ///
    /// Eager and unpaginated. Order follows the store scan and is unspecified.
    /// Malformed numeric fields are reported as zero.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::StoreUnavailable`] if the scan fails.
    pub async fn list_all(&self) -> Result<Vec<StatsSummary>, ShortenError> {
        let scanned = self.store.scan_stats().await?;

        Ok(scanned
            .into_iter()
            .map(|entry| {
                let short_url = build_short_url(&self.base_url, &entry.slug);
                StatsSummary::new(entry.slug, short_url, StatsRecord::from_fields(&entry.fields))
            })
            .collect())
    }

    /// Returns the summary for a single slug.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if no stats record exists.
    /// Returns [`ShortenError::StoreUnavailable`] on store failures.
    pub async fn get(&self, slug: &str) -> Result<StatsSummary, ShortenError> {
        let fields = self.store.get_stats(slug).await?;
        if fields.is_empty() {
            return Err(ShortenError::NotFound(slug.to_string()));
        }

        Ok(StatsSummary::new(
            slug.to_string(),
            build_short_url(&self.base_url, slug),
            StatsRecord::from_fields(&fields),
        ))
    }
}
