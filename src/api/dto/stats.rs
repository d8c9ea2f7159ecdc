//! DTO for a single slug's click statistics.

use serde::Serialize;

use crate::domain::entities::StatsSummary;

/// Click statistics of one slug. Timestamps are Unix seconds.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub slug: String,
    pub original_url: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: i64,
    pub last_accessed: i64,
}

impl From<StatsSummary> for StatsResponse {
    fn from(summary: StatsSummary) -> Self {
        Self {
            slug: summary.slug,
            original_url: summary.original_url,
            short_url: summary.short_url,
            click_count: summary.click_count,
            created_at: summary.created_at,
            last_accessed: summary.last_accessed,
        }
    }
}
