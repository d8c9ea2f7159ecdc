//! Stats record and its reportable summary.

use std::collections::HashMap;

/// Field names of the persisted stats hash.
pub mod fields {
    pub const ORIGINAL_URL: &str = "original_url";
    pub const CREATED_AT: &str = "created_at";
    pub const LAST_ACCESSED: &str = "last_accessed";
    pub const CLICK_COUNT: &str = "click_count";
}

/// Access statistics stored alongside a URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub original_url: String,
    pub created_at: i64,
    pub last_accessed: i64,
    pub click_count: i64,
}

impl StatsRecord {
    /// A zeroed record for a slug allocated at `now`.
    pub fn new(original_url: impl Into<String>, now: i64) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: now,
            last_accessed: now,
            click_count: 0,
        }
    }

    /// Flattens the record into hash fields.
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (fields::ORIGINAL_URL, self.original_url.clone()),
            (fields::CREATED_AT, self.created_at.to_string()),
            (fields::LAST_ACCESSED, self.last_accessed.to_string()),
            (fields::CLICK_COUNT, self.click_count.to_string()),
        ]
    }

    /// Rebuilds a record from hash fields.
    ///
    /// Missing or malformed numeric fields read as zero; a missing URL reads as empty.
    pub fn from_fields(map: &HashMap<String, String>) -> Self {
        Self {
            original_url: map.get(fields::ORIGINAL_URL).cloned().unwrap_or_default(),
            created_at: parse_i64(map, fields::CREATED_AT),
            last_accessed: parse_i64(map, fields::LAST_ACCESSED),
            click_count: parse_i64(map, fields::CLICK_COUNT),
        }
    }
}

fn parse_i64(map: &HashMap<String, String>, field: &str) -> i64 {
    map.get(field)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// One row of the aggregated statistics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub slug: String,
    pub original_url: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: i64,
    pub last_accessed: i64,
}

impl StatsSummary {
    pub fn new(slug: String, short_url: String, record: StatsRecord) -> Self {
        Self {
            slug,
            original_url: record.original_url,
            short_url,
            click_count: record.click_count,
            created_at: record.created_at,
            last_accessed: record.last_accessed,
        }
    }
}
