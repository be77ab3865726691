use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Entry, ReportData, RiderStats};
use crate::time::Period;

/// An entry flattened for table display: rider name resolved, total and
/// per-entry ratios precomputed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnrichedEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub rider_id: Uuid,
    pub rider_name: String,
    pub successful: u32,
    pub failed: u32,
    pub returned: u32,
    pub total: u32,
    pub success_ratio: f64,
    pub fail_ratio: f64,
    pub return_ratio: f64,
}

impl EnrichedEntry {
    pub fn from_entry(entry: &Entry, rider_name: &str) -> Self {
        let total = entry.total();
        let (success_ratio, fail_ratio, return_ratio) = if total > 0 {
            let total_f = total as f64;
            (
                entry.successful as f64 / total_f,
                entry.failed as f64 / total_f,
                entry.returned as f64 / total_f,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Self {
            id: entry.id,
            date: entry.date,
            rider_id: entry.rider_id,
            rider_name: rider_name.to_string(),
            successful: entry.successful,
            failed: entry.failed,
            returned: entry.returned,
            total,
            success_ratio,
            fail_ratio,
            return_ratio,
        }
    }
}

/// Optional criteria for listing entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub rider_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(rider_id) = self.rider_id {
            if entry.rider_id != rider_id {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.date > to {
                return false;
            }
        }
        true
    }
}

/// Per-rider stats as handed to the text-generation backend: ratios scaled
/// to 0-100 and rounded to two decimals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InsightsRiderStats {
    pub rider_name: String,
    pub successful: u32,
    pub failed: u32,
    pub returned: u32,
    pub total: u32,
    pub success_ratio: f64,
    pub fail_ratio: f64,
    pub return_ratio: f64,
    pub active_days: u32,
}

/// Report shape consumed by the insights backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InsightsPayload {
    pub rider_stats: Vec<InsightsRiderStats>,
    pub total_entries: u32,
    pub period: Period,
}

fn as_rounded_percent(ratio: f64) -> f64 {
    (ratio * 100.0 * 100.0).round() / 100.0
}

impl InsightsPayload {
    pub fn from_report(report: &ReportData) -> Self {
        let rider_stats = report
            .rider_stats
            .iter()
            .map(|s: &RiderStats| InsightsRiderStats {
                rider_name: s.rider_name.clone(),
                successful: s.successful,
                failed: s.failed,
                returned: s.returned,
                total: s.total,
                success_ratio: as_rounded_percent(s.success_ratio),
                fail_ratio: as_rounded_percent(s.fail_ratio),
                return_ratio: as_rounded_percent(s.return_ratio),
                active_days: s.active_days,
            })
            .collect();

        Self {
            rider_stats,
            total_entries: report.total_entries,
            period: report.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rider;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_enriched_entry_ratios() {
        let rider = Rider::new("Alex Green".to_string());
        let entry = Entry::new(date("2025-08-03"), rider.id, 8, 1, 1);

        let enriched = EnrichedEntry::from_entry(&entry, &rider.name);
        assert_eq!(enriched.total, 10);
        assert!((enriched.success_ratio - 0.8).abs() < 1e-9);
        assert!((enriched.fail_ratio - 0.1).abs() < 1e-9);
        assert!((enriched.return_ratio - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_enriched_entry_zero_total_has_zero_ratios() {
        let rider = Rider::new("Idle".to_string());
        let entry = Entry::new(date("2025-08-03"), rider.id, 0, 0, 0);

        let enriched = EnrichedEntry::from_entry(&entry, &rider.name);
        assert_eq!(enriched.total, 0);
        assert_eq!(enriched.success_ratio, 0.0);
        assert_eq!(enriched.fail_ratio, 0.0);
        assert_eq!(enriched.return_ratio, 0.0);
    }

    #[test]
    fn test_filter_by_rider_and_date_range() {
        let rider = Rider::new("Alex Green".to_string());
        let other = Rider::new("Maria Garcia".to_string());
        let entry = Entry::new(date("2025-08-10"), rider.id, 5, 0, 0);

        let all = EntryFilter::default();
        assert!(all.matches(&entry));

        let by_rider = EntryFilter { rider_id: Some(other.id), ..Default::default() };
        assert!(!by_rider.matches(&entry));

        let in_range = EntryFilter {
            from: Some(date("2025-08-01")),
            to: Some(date("2025-08-31")),
            ..Default::default()
        };
        assert!(in_range.matches(&entry));

        let before = EntryFilter { to: Some(date("2025-08-09")), ..Default::default() };
        assert!(!before.matches(&entry));

        let after = EntryFilter { from: Some(date("2025-08-11")), ..Default::default() };
        assert!(!after.matches(&entry));
    }

    #[test]
    fn test_insights_payload_scales_and_rounds_ratios() {
        let rider = Rider::new("Alex Green".to_string());
        let report = ReportData {
            rider_stats: vec![RiderStats {
                rider_id: rider.id,
                rider_name: rider.name.clone(),
                successful: 2,
                failed: 1,
                returned: 0,
                total: 3,
                success_ratio: 2.0 / 3.0,
                fail_ratio: 1.0 / 3.0,
                return_ratio: 0.0,
                active_days: 1,
            }],
            total_entries: 3,
            period: Period { year: 2025, month: 8 },
        };

        let payload = InsightsPayload::from_report(&report);
        let stats = &payload.rider_stats[0];
        assert_eq!(stats.success_ratio, 66.67);
        assert_eq!(stats.fail_ratio, 33.33);
        assert_eq!(stats.return_ratio, 0.0);
        assert_eq!(payload.total_entries, 3);
    }
}
