use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One rider's delivery outcome counts for one calendar day.
///
/// Dates are stored at day granularity; two entries for the same rider on the
/// same day are allowed and are merged at aggregation time, not here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub rider_id: Uuid,
    pub successful: u32,
    pub failed: u32,
    pub returned: u32,
}

impl Entry {
    pub fn new(date: NaiveDate, rider_id: Uuid, successful: u32, failed: u32, returned: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            rider_id,
            successful,
            failed,
            returned,
        }
    }

    /// Total deliveries recorded by this entry. Derived, never stored.
    pub fn total(&self) -> u32 {
        self.successful + self.failed + self.returned
    }
}
