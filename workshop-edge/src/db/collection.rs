//! Typed collections over blob keys

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use super::store::{Store, WriteBatch};

/// A `Vec<T>` stored as one JSON array under `key`
pub struct Collection<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    /// Load the list; missing or unreadable data is an empty list
    pub fn load(&self, store: &Store) -> Vec<T> {
        self.load_checked(store).unwrap_or_default()
    }

    /// Like [`Collection::load`], but `None` when stored bytes failed to parse
    pub fn load_checked(&self, store: &Store) -> Option<Vec<T>> {
        let Some(bytes) = store.read_raw(self.key) else {
            return Some(Vec::new());
        };
        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to parse stored collection");
                None
            }
        }
    }

    /// Serialize into a batch without committing
    pub fn stage(&self, batch: &mut WriteBatch, items: &[T]) {
        match serde_json::to_vec(items) {
            Ok(bytes) => batch.put(self.key, bytes),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to serialize collection");
                batch.poison();
            }
        }
    }

    /// Stage and commit on its own
    pub fn save(&self, store: &Store, items: &[T]) -> bool {
        let mut batch = WriteBatch::new();
        self.stage(&mut batch, items);
        store.commit(batch)
    }
}
