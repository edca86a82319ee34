//! Blob storage backends
//!
//! Every collection is one JSON blob under a fixed key, so a backend only
//! has to read a key and write a set of keys atomically.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`RedbStore`] | On-disk single-file database (table `blobs`) |
//! | [`MemoryStore`] | Process-local map for tests and throwaway sessions |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `write_batch` returns
//! the whole batch is on disk, and a crash mid-commit leaves the previous
//! state intact. There is no cross-process locking above what redb does
//! itself; the last committed batch wins.

use parking_lot::Mutex;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// key = collection key, value = JSON bytes
const BLOBS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("blobs");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value blob backend
pub trait BlobStore: Send + Sync {
    /// Read one blob; `None` if the key was never written
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Write all entries or none of them
    fn write_batch(&self, entries: &[(String, Vec<u8>)]) -> StorageResult<()>;
}

/// Blob storage backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table up front so read transactions never see it missing
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BLOBS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl BlobStore for RedbStore {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BLOBS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn write_batch(&self, entries: &[(String, Vec<u8>)]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            for (key, value) in entries {
                table.insert(key.as_str(), value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-process blob storage
///
/// `reject_writes` makes every batch fail, which is how tests exercise the
/// soft write-failure path.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Put raw bytes under a key, bypassing serialization
    pub fn put_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.blobs.lock().insert(key.to_string(), bytes.into());
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn write_batch(&self, entries: &[(String, Vec<u8>)]) -> StorageResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(format!(
                "{} key(s) not written",
                entries.len()
            )));
        }
        let mut blobs = self.blobs.lock();
        for (key, value) in entries {
            blobs.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
