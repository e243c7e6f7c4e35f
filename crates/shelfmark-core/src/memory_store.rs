//! In-memory catalog store.
//!
//! Backs engine tests and small ephemeral catalogs. Same normalization and
//! ordering behavior as the SQLite store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use uuid::Uuid;

use shelfmark_domain::{sort_records, Record};

use crate::matcher::{ApproximateMatch, APPROXIMATE_MATCH_LIMIT};
use crate::query::CatalogPredicate;
use crate::store::{CatalogStore, StoreError};

/// A `Mutex<BTreeMap>`-backed store.
#[derive(Default)]
pub struct MemoryCatalogStore {
    records: Mutex<BTreeMap<Uuid, Record>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<Uuid, Record>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Storage("store mutex poisoned".to_string()))
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn save(&self, mut record: Record) -> Result<Uuid, StoreError> {
        record.normalize();
        let mut records = self.lock()?;
        if records.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists(record.id));
        }
        let id = record.id;
        records.insert(id, record);
        Ok(id)
    }

    fn update(&self, id: Uuid, record: Record) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        let stored = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        stored.apply_update(record);
        Ok(())
    }

    fn find_one(&self, id: Uuid) -> Result<Option<Record>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn find(&self, predicate: &CatalogPredicate) -> Result<Vec<Record>, StoreError> {
        let records = self.lock()?;
        let mut matched: Vec<Record> = records
            .values()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect();
        sort_records(&mut matched);
        tracing::debug!(matched = matched.len(), total = records.len(), "catalog query");
        Ok(matched)
    }

    fn find_approximate(
        &self,
        matcher: &ApproximateMatch,
    ) -> Result<Vec<Record>, StoreError> {
        let records = self.lock()?;
        let matched: Vec<Record> = records
            .values()
            .filter(|r| matcher.matches(r))
            .take(APPROXIMATE_MATCH_LIMIT)
            .cloned()
            .collect();
        Ok(matched)
    }
}
