pub mod entry;
pub mod report;
pub mod rider;

pub use entry::Entry;
pub use report::{DashboardMetrics, ReportData, RiderStats};
pub use rider::Rider;
