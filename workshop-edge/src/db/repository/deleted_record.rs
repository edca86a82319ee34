//! Cancellation log repository (append-only)

use shared::models::DeletedRecordEntry;

use super::BaseRepository;
use crate::db::{Collection, Store, WriteBatch, keys};

const DELETED_RECORDS: Collection<DeletedRecordEntry> = Collection::new(keys::DELETED_RECORDS);

#[derive(Clone)]
pub struct DeletedRecordRepository {
    base: BaseRepository,
}

impl DeletedRecordRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// Oldest first
    pub fn find_all(&self) -> Vec<DeletedRecordEntry> {
        DELETED_RECORDS.load(self.base.store())
    }

    /// Stage the log with `entry` appended.
    ///
    /// An unparseable stored log is left as it is and nothing is staged;
    /// returns whether the entry was staged.
    pub fn stage_append(&self, batch: &mut WriteBatch, entry: DeletedRecordEntry) -> bool {
        let Some(mut log) = DELETED_RECORDS.load_checked(self.base.store()) else {
            tracing::warn!(record_id = %entry.id, "Cancellation log unreadable, entry not appended");
            return false;
        };
        log.push(entry);
        DELETED_RECORDS.stage(batch, &log);
        true
    }
}
