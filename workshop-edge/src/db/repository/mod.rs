//! Repository Module
//!
//! Typed access to each collection. Lookups return `Option<T>` by typed id;
//! nothing outside this module compares ids by hand.

pub mod car_history;
pub mod deleted_record;
pub mod record;
pub mod service;
pub mod shift;
pub mod theme;
pub mod user;

// Re-exports
pub use car_history::CarHistoryRepository;
pub use deleted_record::DeletedRecordRepository;
pub use record::RecordRepository;
pub use service::ServiceRepository;
pub use shift::ShiftRepository;
pub use theme::ThemeRepository;
pub use user::UserRepository;

use shared::models::RecordId;
use thiserror::Error;

use super::Store;

/// Repository error types
///
/// Only validation-style failures surface here. Storage read and write
/// failures are logged and absorbed by [`Store`].
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Shift {0} is still open")]
    ShiftStillOpen(i64),

    #[error("Invalid shift range: opened {opened_at} is not before closed {closed_at}")]
    InvalidShiftRange {
        opened_at: chrono::DateTime<chrono::Utc>,
        closed_at: chrono::DateTime<chrono::Utc>,
    },

    #[error("User {0} is not an operator")]
    NotAnOperator(i64),

    #[error("Cancelled record {0} cannot be edited")]
    CancelledRecordLocked(RecordId),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with store reference
#[derive(Clone)]
pub struct BaseRepository {
    store: Store,
}

impl BaseRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}
