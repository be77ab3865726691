use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::Period;

/// Aggregated per-rider statistics for one report period.
///
/// Ratios are 0-1 fractions of `total`. When `total` is 0 all three ratios
/// are 0.0 rather than NaN, but such riders never survive aggregation anyway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiderStats {
    pub rider_id: Uuid,
    pub rider_name: String,
    pub successful: u32,
    pub failed: u32,
    pub returned: u32,
    pub total: u32,
    pub success_ratio: f64,
    pub fail_ratio: f64,
    pub return_ratio: f64,
    /// Distinct calendar days with at least one entry in the period.
    pub active_days: u32,
}

/// Ranked leaderboard for a period.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportData {
    /// Sorted by descending success ratio, then descending total; truncated
    /// to the caller's top-N.
    pub rider_stats: Vec<RiderStats>,
    /// Sum of totals over every period entry with a known rider, including
    /// riders cut by the top-N truncation.
    pub total_entries: u32,
    /// Echo of the caller's period selection, never derived from the data.
    pub period: Period,
}

/// Headline ratios for the dashboard cards, computed over all entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardMetrics {
    pub success_ratio: f64,
    pub fail_ratio: f64,
    pub return_ratio: f64,
    pub rider_count: usize,
}
