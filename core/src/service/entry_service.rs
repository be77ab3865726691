use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{DashboardMetrics, Entry, Rider};
use crate::repository::DashboardStore;
use crate::service::dto::{EnrichedEntry, EntryFilter};
use crate::service::report::dashboard_metrics;

/// Dashboard editing: rider registration and entry CRUD over a
/// [`DashboardStore`] snapshot.
pub struct EntryService<S: DashboardStore> {
    store: S,
}

impl<S: DashboardStore> EntryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_rider(&self, name: &str) -> Result<Rider> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Rider name is required"));
        }

        let mut snapshot = self.store.load()?;
        if snapshot.riders.iter().any(|r| r.name == name) {
            return Err(anyhow!("Rider '{}' already exists", name));
        }

        let rider = Rider::new(name.to_string());
        snapshot.riders.push(rider.clone());
        self.store.save(&snapshot)?;
        Ok(rider)
    }

    pub fn list_riders(&self) -> Result<Vec<Rider>> {
        Ok(self.store.load()?.riders)
    }

    pub fn find_rider_by_name(&self, name: &str) -> Result<Option<Rider>> {
        let snapshot = self.store.load()?;
        Ok(snapshot.riders.into_iter().find(|r| r.name == name))
    }

    /// Record a day's counts for a rider. The rider must already exist.
    pub fn add_entry(
        &self,
        date: NaiveDate,
        rider_id: Uuid,
        successful: u32,
        failed: u32,
        returned: u32,
    ) -> Result<Entry> {
        let mut snapshot = self.store.load()?;
        if !snapshot.riders.iter().any(|r| r.id == rider_id) {
            return Err(anyhow!("Rider with ID {} not found", rider_id));
        }

        let entry = Entry::new(date, rider_id, successful, failed, returned);
        snapshot.entries.push(entry.clone());
        // Keep entries newest-first, matching the display order
        snapshot.entries.sort_by(|a, b| b.date.cmp(&a.date));
        self.store.save(&snapshot)?;
        Ok(entry)
    }

    pub fn update_entry(&self, entry: &Entry) -> Result<()> {
        let mut snapshot = self.store.load()?;
        if let Some(pos) = snapshot.entries.iter().position(|e| e.id == entry.id) {
            snapshot.entries[pos] = entry.clone();
            snapshot.entries.sort_by(|a, b| b.date.cmp(&a.date));
            self.store.save(&snapshot)?;
            Ok(())
        } else {
            Err(anyhow!("Entry with ID {} not found", entry.id))
        }
    }

    pub fn delete_entry(&self, id: &Uuid) -> Result<()> {
        let mut snapshot = self.store.load()?;
        let initial_len = snapshot.entries.len();
        snapshot.entries.retain(|e| e.id != *id);

        if snapshot.entries.len() == initial_len {
            return Err(anyhow!("Entry with ID {} not found", id));
        }

        self.store.save(&snapshot)?;
        Ok(())
    }

    /// Resolve a unique entry from a hex id prefix, for command-line use.
    pub fn find_entry_by_id_prefix(&self, prefix: &str) -> Result<Entry> {
        let snapshot = self.store.load()?;
        let matches: Vec<&Entry> = snapshot
            .entries
            .iter()
            .filter(|e| e.id.to_string().starts_with(prefix))
            .collect();

        match matches.len() {
            1 => Ok(matches[0].clone()),
            0 => Err(anyhow!("No entry matches ID prefix '{}'", prefix)),
            n => Err(anyhow!("ID prefix '{}' is ambiguous ({} matches)", prefix, n)),
        }
    }

    /// Entries newest-first, rider names resolved, optionally filtered.
    pub fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<EnrichedEntry>> {
        let snapshot = self.store.load()?;

        let mut enriched: Vec<EnrichedEntry> = snapshot
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .map(|e| {
                let rider_name = snapshot
                    .riders
                    .iter()
                    .find(|r| r.id == e.rider_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or("Unknown Rider");
                EnrichedEntry::from_entry(e, rider_name)
            })
            .collect();

        enriched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(enriched)
    }

    pub fn metrics(&self) -> Result<DashboardMetrics> {
        let snapshot = self.store.load()?;
        Ok(dashboard_metrics(&snapshot.entries, &snapshot.riders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Snapshot;
    use std::cell::RefCell;

    struct MemoryStore {
        snapshot: RefCell<Snapshot>,
    }

    impl MemoryStore {
        fn empty() -> Self {
            Self {
                snapshot: RefCell::new(Snapshot::default()),
            }
        }
    }

    impl DashboardStore for &MemoryStore {
        fn load(&self) -> Result<Snapshot> {
            Ok(self.snapshot.borrow().clone())
        }

        fn save(&self, snapshot: &Snapshot) -> Result<()> {
            *self.snapshot.borrow_mut() = snapshot.clone();
            Ok(())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_rider_rejects_blank_and_duplicate_names() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);

        assert!(service.add_rider("  ").is_err());

        service.add_rider("Alex Green").unwrap();
        assert!(service.add_rider("Alex Green").is_err());
        assert_eq!(service.list_riders().unwrap().len(), 1);
    }

    #[test]
    fn test_add_entry_requires_known_rider() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);

        let unknown = Uuid::new_v4();
        assert!(service.add_entry(date("2025-08-03"), unknown, 5, 0, 0).is_err());

        let rider = service.add_rider("Alex Green").unwrap();
        let entry = service.add_entry(date("2025-08-03"), rider.id, 5, 1, 0).unwrap();
        assert_eq!(entry.total(), 6);
    }

    #[test]
    fn test_entries_listed_newest_first() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);
        let rider = service.add_rider("Alex Green").unwrap();

        service.add_entry(date("2025-08-01"), rider.id, 1, 0, 0).unwrap();
        service.add_entry(date("2025-08-10"), rider.id, 2, 0, 0).unwrap();
        service.add_entry(date("2025-08-05"), rider.id, 3, 0, 0).unwrap();

        let listed = service.list_entries(&EntryFilter::default()).unwrap();
        let dates: Vec<NaiveDate> = listed.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date("2025-08-10"), date("2025-08-05"), date("2025-08-01")]);
    }

    #[test]
    fn test_list_entries_applies_filter_and_resolves_names() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);
        let alex = service.add_rider("Alex Green").unwrap();
        let maria = service.add_rider("Maria Garcia").unwrap();

        service.add_entry(date("2025-08-01"), alex.id, 1, 0, 0).unwrap();
        service.add_entry(date("2025-08-02"), maria.id, 2, 0, 0).unwrap();

        let filter = EntryFilter { rider_id: Some(maria.id), ..Default::default() };
        let listed = service.list_entries(&filter).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rider_name, "Maria Garcia");
    }

    #[test]
    fn test_update_and_delete_entry() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);
        let rider = service.add_rider("Alex Green").unwrap();

        let mut entry = service.add_entry(date("2025-08-03"), rider.id, 5, 0, 0).unwrap();
        entry.failed = 2;
        service.update_entry(&entry).unwrap();

        let listed = service.list_entries(&EntryFilter::default()).unwrap();
        assert_eq!(listed[0].failed, 2);

        service.delete_entry(&entry.id).unwrap();
        assert!(service.list_entries(&EntryFilter::default()).unwrap().is_empty());
        assert!(service.delete_entry(&entry.id).is_err());
    }

    #[test]
    fn test_find_entry_by_id_prefix() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);
        let rider = service.add_rider("Alex Green").unwrap();
        let entry = service.add_entry(date("2025-08-03"), rider.id, 5, 0, 0).unwrap();

        let prefix = &entry.id.to_string()[..8];
        let found = service.find_entry_by_id_prefix(prefix).unwrap();
        assert_eq!(found.id, entry.id);

        assert!(service.find_entry_by_id_prefix("zzzzzzzz").is_err());
    }

    #[test]
    fn test_metrics_over_all_entries() {
        let store = MemoryStore::empty();
        let service = EntryService::new(&store);
        let rider = service.add_rider("Alex Green").unwrap();
        service.add_entry(date("2025-08-01"), rider.id, 8, 1, 1).unwrap();

        let metrics = service.metrics().unwrap();
        assert!((metrics.success_ratio - 0.8).abs() < 1e-9);
        assert_eq!(metrics.rider_count, 1);
    }
}
