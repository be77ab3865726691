
#[cfg(test)]
mod tests {
    use crate::model::{Entry, Rider};
    use crate::repository::{DashboardStore, Snapshot};
    use crate::service::report::DEFAULT_TOP_N;
    use crate::time::Period;
    use crate::usecase::monthly_report::MonthlyReportUseCase;
    use anyhow::Result;
    use chrono::NaiveDate;

    struct MockStore {
        snapshot: Snapshot,
    }

    impl DashboardStore for MockStore {
        fn load(&self) -> Result<Snapshot> {
            Ok(self.snapshot.clone())
        }

        fn save(&self, _snapshot: &Snapshot) -> Result<()> {
            unimplemented!()
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_only_entries_in_the_period_are_aggregated() {
        let alex = Rider::new("Alex Green".to_string());
        let maria = Rider::new("Maria Garcia".to_string());

        let snapshot = Snapshot {
            riders: vec![alex.clone(), maria.clone()],
            entries: vec![
                Entry::new(date("2025-08-03"), alex.id, 10, 0, 0),
                Entry::new(date("2025-08-20"), alex.id, 5, 1, 0),
                // Outside the requested month
                Entry::new(date("2025-07-31"), alex.id, 99, 0, 0),
                Entry::new(date("2025-09-01"), maria.id, 42, 0, 0),
            ],
        };

        let store = MockStore { snapshot };
        let usecase = MonthlyReportUseCase::new(&store);
        let period = Period { year: 2025, month: 8 };

        let report = usecase.generate(period, DEFAULT_TOP_N).unwrap();

        assert_eq!(report.period, period);
        assert_eq!(report.total_entries, 16);
        assert_eq!(report.rider_stats.len(), 1);
        assert_eq!(report.rider_stats[0].rider_id, alex.id);
        assert_eq!(report.rider_stats[0].active_days, 2);
    }

    #[test]
    fn test_empty_month_gives_empty_leaderboard() {
        let alex = Rider::new("Alex Green".to_string());
        let snapshot = Snapshot {
            riders: vec![alex.clone()],
            entries: vec![Entry::new(date("2025-07-15"), alex.id, 10, 0, 0)],
        };

        let store = MockStore { snapshot };
        let usecase = MonthlyReportUseCase::new(&store);

        let report = usecase
            .generate(Period { year: 2025, month: 8 }, DEFAULT_TOP_N)
            .unwrap();

        assert!(report.rider_stats.is_empty());
        assert_eq!(report.total_entries, 0);
    }
}
