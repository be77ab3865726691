pub mod file;
pub mod traits;

pub use file::FileDashboardStore;
pub use traits::{DashboardStore, Snapshot};
