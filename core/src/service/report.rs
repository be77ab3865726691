use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{DashboardMetrics, Entry, ReportData, Rider, RiderStats};
use crate::time::Period;

/// Leaderboard length for the default report view.
pub const DEFAULT_TOP_N: usize = 6;
/// Leaderboard length when the caller asks for the extended view.
pub const EXTENDED_TOP_N: usize = 10;

#[derive(Default)]
struct RiderAccumulator {
    successful: u32,
    failed: u32,
    returned: u32,
    active_days: HashSet<NaiveDate>,
}

/// Aggregate entries into a ranked per-rider leaderboard.
///
/// Pure and idempotent. Entries referencing an unknown rider are skipped
/// silently; riders with no matching entries are excluded from the output
/// rather than zero-filled. The caller is responsible for filtering entries
/// to the period beforehand; `period` is echoed into the result, never
/// derived from the data.
///
/// Ranking: descending success ratio, ties broken by descending total.
/// Full ties keep the order of the `riders` input (the sort is stable and
/// accumulators are kept in rider order).
pub fn generate_report(entries: &[Entry], riders: &[Rider], period: Period, top_n: usize) -> ReportData {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut accumulators: Vec<RiderAccumulator> = Vec::with_capacity(riders.len());
    for (i, rider) in riders.iter().enumerate() {
        index.insert(rider.id, i);
        accumulators.push(RiderAccumulator::default());
    }

    // total_entries covers every matched entry, including riders later cut
    // by the top-N truncation
    let mut total_entries: u32 = 0;
    for entry in entries {
        if let Some(&i) = index.get(&entry.rider_id) {
            let acc = &mut accumulators[i];
            acc.successful += entry.successful;
            acc.failed += entry.failed;
            acc.returned += entry.returned;
            acc.active_days.insert(entry.date);
            total_entries += entry.total();
        }
    }

    let mut rider_stats: Vec<RiderStats> = riders
        .iter()
        .zip(accumulators)
        .filter_map(|(rider, acc)| {
            let total = acc.successful + acc.failed + acc.returned;
            if total == 0 {
                return None;
            }
            let total_f = total as f64;
            Some(RiderStats {
                rider_id: rider.id,
                rider_name: rider.name.clone(),
                successful: acc.successful,
                failed: acc.failed,
                returned: acc.returned,
                total,
                success_ratio: acc.successful as f64 / total_f,
                fail_ratio: acc.failed as f64 / total_f,
                return_ratio: acc.returned as f64 / total_f,
                active_days: acc.active_days.len() as u32,
            })
        })
        .collect();

    rider_stats.sort_by(|a, b| {
        b.success_ratio
            .partial_cmp(&a.success_ratio)
            .unwrap_or(Ordering::Equal)
            .then(b.total.cmp(&a.total))
    });
    rider_stats.truncate(top_n);

    ReportData {
        rider_stats,
        total_entries,
        period,
    }
}

/// Overall delivery ratios across a set of entries, for the dashboard cards.
/// Ratios default to 0.0 when there are no deliveries so the UI never has to
/// format a NaN percentage.
pub fn dashboard_metrics(entries: &[Entry], riders: &[Rider]) -> DashboardMetrics {
    let successful: u32 = entries.iter().map(|e| e.successful).sum();
    let failed: u32 = entries.iter().map(|e| e.failed).sum();
    let returned: u32 = entries.iter().map(|e| e.returned).sum();
    let total = successful + failed + returned;

    let (success_ratio, fail_ratio, return_ratio) = if total > 0 {
        let total_f = total as f64;
        (
            successful as f64 / total_f,
            failed as f64 / total_f,
            returned as f64 / total_f,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    DashboardMetrics {
        success_ratio,
        fail_ratio,
        return_ratio,
        rider_count: riders.len(),
    }
}
