//! Core domain entities.
//!
//! - [`ShortLink`] - The result of allocating a slug for a destination URL
//! - [`StatsRecord`] - Access statistics persisted next to a URL record
//! - [`StatsSummary`] - A stats record prepared for reporting

pub mod short_link;
pub mod stats;

pub use short_link::{ShortLink, build_short_url};
pub use stats::{StatsRecord, StatsSummary};
