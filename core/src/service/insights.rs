use std::fmt::Write;

use anyhow::Result;

use crate::model::ReportData;
use crate::service::dto::InsightsPayload;

/// Opaque text-generation boundary: structured stats in, prose out.
/// Any backend satisfying this contract works; the core never retries and
/// a backend failure leaves the already-computed report intact.
pub trait InsightsGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Render the analyst prompt for a report. Ratios arrive pre-scaled to
/// percentages in the payload.
pub fn render_insights_prompt(payload: &InsightsPayload) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a data analyst for a delivery company. You have been given a performance report for the top riders for {}.",
        payload.period
    );
    let _ = writeln!(
        prompt,
        "The report includes the following data for each rider: successful deliveries, failed deliveries, returned items, total deliveries, success ratio, fail ratio, return ratio, and active days."
    );
    let _ = writeln!(
        prompt,
        "The total number of entries for the month was {}.",
        payload.total_entries
    );
    prompt.push('\n');
    prompt.push_str("The rider data is as follows:\n");

    for stats in &payload.rider_stats {
        let _ = writeln!(prompt, "- {}:", stats.rider_name);
        let _ = writeln!(prompt, "    Success Ratio: {}%", stats.success_ratio);
        let _ = writeln!(prompt, "    Total Deliveries: {}", stats.total);
        let _ = writeln!(prompt, "    Active Days: {}", stats.active_days);
        let _ = writeln!(
            prompt,
            "    Successful: {}, Failed: {}, Returned: {}",
            stats.successful, stats.failed, stats.returned
        );
    }

    prompt.push('\n');
    prompt.push_str(
        "Please provide a concise, professional, and insightful summary of the report. The summary should be 2-3 short paragraphs.\n\
         Highlight the top performer and what makes them stand out, any general trends you notice, and a positive observation or area for potential improvement for the team as a whole. Do not be negative.\n\
         Respond with a single block of plain text. Do not use markdown headings or lists.\n",
    );

    prompt
}

/// Runs the insights step for a report. Skips generation entirely when the
/// leaderboard is empty.
pub struct InsightsService<G: InsightsGenerator> {
    generator: G,
}

impl<G: InsightsGenerator> InsightsService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn summarize(&self, report: &ReportData) -> Result<Option<String>> {
        if report.rider_stats.is_empty() {
            return Ok(None);
        }
        let payload = InsightsPayload::from_report(report);
        let prompt = render_insights_prompt(&payload);
        let text = self.generator.generate(&prompt)?;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiderStats;
    use crate::time::Period;
    use anyhow::anyhow;
    use uuid::Uuid;

    fn sample_report() -> ReportData {
        ReportData {
            rider_stats: vec![RiderStats {
                rider_id: Uuid::new_v4(),
                rider_name: "Alex Green".to_string(),
                successful: 45,
                failed: 3,
                returned: 2,
                total: 50,
                success_ratio: 0.9,
                fail_ratio: 0.06,
                return_ratio: 0.04,
                active_days: 12,
            }],
            total_entries: 120,
            period: Period { year: 2025, month: 8 },
        }
    }

    #[test]
    fn test_prompt_contains_period_totals_and_rider_lines() {
        let payload = InsightsPayload::from_report(&sample_report());
        let prompt = render_insights_prompt(&payload);

        assert!(prompt.contains("for 8/2025"));
        assert!(prompt.contains("The total number of entries for the month was 120."));
        assert!(prompt.contains("- Alex Green:"));
        assert!(prompt.contains("Success Ratio: 90%"));
        assert!(prompt.contains("Total Deliveries: 50"));
        assert!(prompt.contains("Active Days: 12"));
        assert!(prompt.contains("Successful: 45, Failed: 3, Returned: 2"));
    }

    struct CannedGenerator;
    impl InsightsGenerator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("A strong month overall.".to_string())
        }
    }

    struct FailingGenerator;
    impl InsightsGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("backend unavailable"))
        }
    }

    #[test]
    fn test_summarize_skips_empty_report() {
        let empty = ReportData {
            rider_stats: vec![],
            total_entries: 0,
            period: Period { year: 2025, month: 8 },
        };
        let service = InsightsService::new(CannedGenerator);
        assert_eq!(service.summarize(&empty).unwrap(), None);
    }

    #[test]
    fn test_summarize_returns_backend_text() {
        let service = InsightsService::new(CannedGenerator);
        let summary = service.summarize(&sample_report()).unwrap();
        assert_eq!(summary, Some("A strong month overall.".to_string()));
    }

    #[test]
    fn test_backend_failure_propagates_without_panic() {
        let service = InsightsService::new(FailingGenerator);
        assert!(service.summarize(&sample_report()).is_err());
    }
}
