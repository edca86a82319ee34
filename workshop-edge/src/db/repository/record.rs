//! Record Repository
//!
//! Loading is not a pure read: statuses pass through the normalizer on
//! deserialize and records without an id get one. When either changes the
//! stored JSON, the cleaned list is written back.

use serde_json::Value;
use shared::models::{Record, RecordId, RecordStatus};
use shared::util;

use super::BaseRepository;
use crate::db::{Collection, Store, WriteBatch, keys};

pub(crate) const RECORDS: Collection<Record> = Collection::new(keys::RECORDS);

#[derive(Clone)]
pub struct RecordRepository {
    base: BaseRepository,
}

impl RecordRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// All records, newest first as stored
    pub fn find_all(&self) -> Vec<Record> {
        let store = self.base.store();
        let Some(raw) = store.read_raw(RECORDS.key()) else {
            return Vec::new();
        };
        let stored: Value = match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = RECORDS.key(), error = %e, "Failed to parse stored records");
                return Vec::new();
            }
        };
        let mut records: Vec<Record> = match serde_json::from_value(stored.clone()) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = RECORDS.key(), error = %e, "Failed to parse stored records");
                return Vec::new();
            }
        };

        let assigned = assign_missing_ids(&mut records, util::now_millis());
        let changed = serde_json::to_value(&records)
            .map(|normalized| normalized != stored)
            .unwrap_or(false);
        if changed {
            tracing::debug!(assigned, total = records.len(), "Writing back normalized records");
            RECORDS.save(store, &records);
        }
        records
    }

    pub fn find_by_id(&self, id: &RecordId) -> Option<Record> {
        self.find_all().into_iter().find(|r| &r.id == id)
    }

    pub fn find_by_status(&self, status: RecordStatus) -> Vec<Record> {
        self.find_all()
            .into_iter()
            .filter(|r| r.payment_status == status)
            .collect()
    }

    pub fn stage(&self, batch: &mut WriteBatch, records: &[Record]) {
        RECORDS.stage(batch, records);
    }

    pub fn save_all(&self, records: &[Record]) -> bool {
        RECORDS.save(self.base.store(), records)
    }
}

/// Give every id-less record `l-{millis}-{index}`; returns how many changed
fn assign_missing_ids(records: &mut [Record], millis: i64) -> usize {
    let mut assigned = 0;
    for (index, record) in records.iter_mut().enumerate() {
        if record.id.is_unassigned() {
            record.id = RecordId::new(format!("l-{millis}-{index}"));
            assigned += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{BlobStore, MemoryStore};
    use std::sync::Arc;

    fn store_with(raw: &str) -> (Arc<MemoryStore>, RecordRepository) {
        let backend = Arc::new(MemoryStore::new());
        backend.put_raw(keys::RECORDS, raw);
        let repo = RecordRepository::new(Store::new(backend.clone()));
        (backend, repo)
    }

    #[test]
    fn test_load_normalizes_and_assigns_ids() {
        let (_, repo) = store_with(
            r#"[
                {"id": 7, "client": "Анна", "car": "Kia Rio", "price": "1500", "payment_status": "Оплачено"},
                {"client": "Пётр", "car": "Lada", "payment_status": "pending"}
            ]"#,
        );

        let records = repo.find_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "7");
        assert_eq!(records[0].price, 1500.0);
        assert_eq!(records[0].payment_status, RecordStatus::Completed);
        assert!(records[1].id.as_str().starts_with("l-"));
        assert!(records[1].id.as_str().ends_with("-1"));
        assert_eq!(records[1].payment_status, RecordStatus::InProgress);

        // written back: the assigned id is stable across loads
        let again = repo.find_all();
        assert_eq!(again[1].id, records[1].id);
        assert_eq!(repo.find_by_id(&RecordId::from(7)).unwrap().client, "Анна");
    }

    #[test]
    fn test_clean_data_is_not_rewritten() {
        let store = Store::in_memory();
        let repo = RecordRepository::new(store.clone());
        let record: Record = serde_json::from_str(
            r#"{"id": "r-1", "client": "A", "car": "B", "price": 100.0, "payment_status": "completed"}"#,
        )
        .unwrap();
        assert!(repo.save_all(&[record]));
        let before = store.read_raw(keys::RECORDS).unwrap();

        repo.find_all();
        assert_eq!(store.read_raw(keys::RECORDS).unwrap(), before);
    }

    #[test]
    fn test_corrupt_records_read_empty() {
        let (backend, repo) = store_with("{not json");
        assert!(repo.find_all().is_empty());
        // left untouched for manual recovery
        assert_eq!(backend.read(keys::RECORDS).unwrap().unwrap(), b"{not json");
    }

    #[test]
    fn test_find_by_status() {
        let (_, repo) = store_with(
            r#"[
                {"id": 1, "payment_status": "cancelled"},
                {"id": 2, "payment_status": "done"},
                {"id": 3}
            ]"#,
        );
        assert_eq!(repo.find_by_status(RecordStatus::Cancelled).len(), 1);
        assert_eq!(repo.find_by_status(RecordStatus::Completed).len(), 1);
        assert_eq!(repo.find_by_status(RecordStatus::InProgress).len(), 1);
    }
}
