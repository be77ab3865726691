use anyhow::Result;

use crate::model::{Entry, ReportData};
use crate::repository::DashboardStore;
use crate::service::report::generate_report;
use crate::time::Period;

/// Month filter + aggregation over a stored snapshot. The aggregator itself
/// never filters by date, so the filtering responsibility lives here.
pub struct MonthlyReportUseCase<'a, S: DashboardStore> {
    store: &'a S,
}

impl<'a, S: DashboardStore> MonthlyReportUseCase<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn generate(&self, period: Period, top_n: usize) -> Result<ReportData> {
        let snapshot = self.store.load()?;

        let month_entries: Vec<Entry> = snapshot
            .entries
            .into_iter()
            .filter(|e| period.contains(e.date))
            .collect();

        Ok(generate_report(&month_entries, &snapshot.riders, period, top_n))
    }
}
