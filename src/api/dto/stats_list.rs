//! DTOs for the statistics report.

use serde::Serialize;

use super::stats::StatsResponse;

/// Every stats record in the store, unpaginated and in scan order.
#[derive(Debug, Serialize)]
pub struct StatsListResponse {
    pub total: usize,
    pub items: Vec<StatsResponse>,
}
