//! Store handle and write batches
//!
//! [`Store`] is the one handle the rest of the crate holds. Its read and
//! commit paths fail soft: errors are logged and turned into "nothing
//! there" / "not persisted", never returned to the caller.

use std::path::Path;
use std::sync::Arc;

use super::storage::{BlobStore, MemoryStore, RedbStore, StorageResult};

/// Shared handle to the blob backend
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn BlobStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn BlobStore>) -> Self {
        Self { backend }
    }

    /// Open (or create) the on-disk database
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::new(Arc::new(RedbStore::open(path)?)))
    }

    /// Fresh process-local store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &dyn BlobStore {
        self.backend.as_ref()
    }

    /// Raw bytes under `key`; backend errors read as missing
    pub fn read_raw(&self, key: &str) -> Option<Vec<u8>> {
        match self.backend.read(key) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    /// Commit a batch; returns whether it reached storage
    pub fn commit(&self, batch: WriteBatch) -> bool {
        if batch.poisoned {
            tracing::warn!(
                keys = ?batch.keys(),
                "Write batch dropped: an entry failed to serialize"
            );
            return false;
        }
        if batch.entries.is_empty() {
            return true;
        }
        match self.backend.write_batch(&batch.entries) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(keys = ?batch.keys(), error = %e, "Failed to write to storage");
                false
            }
        }
    }
}

/// Set of blob writes committed together
#[derive(Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(String, Vec<u8>)>,
    poisoned: bool,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage bytes under `key`, replacing anything staged earlier for it
    pub fn put(&mut self, key: &str, bytes: Vec<u8>) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = bytes;
        } else {
            self.entries.push((key.to_string(), bytes));
        }
    }

    /// Mark the batch unusable; commit will write nothing
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }
}
