pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use input::{expand_key, parse_args, parse_count, ParsedInput};
pub use model::{DashboardMetrics, Entry, ReportData, Rider, RiderStats};
pub use repository::{DashboardStore, FileDashboardStore, Snapshot};
pub use service::dto::{EnrichedEntry, EntryFilter, InsightsPayload};
pub use service::entry_service::EntryService;
pub use service::insights::{render_insights_prompt, InsightsGenerator, InsightsService};
pub use service::report::{dashboard_metrics, generate_report, DEFAULT_TOP_N, EXTENDED_TOP_N};
pub use time::{parse_entry_date, parse_period, Period};
pub use usecase::monthly_report::MonthlyReportUseCase;
