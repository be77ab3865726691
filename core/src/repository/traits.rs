use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{Entry, Rider};

/// Everything the dashboard persists, loaded and saved as one unit.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub riders: Vec<Rider>,
    pub entries: Vec<Entry>,
}

/// Storage boundary for the dashboard. The report aggregator never touches
/// this; services read a snapshot, modify it, and write it back whole.
pub trait DashboardStore {
    fn load(&self) -> Result<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
