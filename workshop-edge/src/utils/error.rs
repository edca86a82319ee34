//! 统一错误处理
//!
//! Layer errors convert into the shared [`AppError`] at the edge of the
//! crate:
//!
//! | Source | ErrorCode |
//! |--------|-----------|
//! | `RepoError::Validation` | `ValidationFailed` |
//! | `RepoError::NotFound` | `NotFound` |
//! | `RepoError::Duplicate` | `AlreadyExists` |
//! | `RepoError::ShiftStillOpen` | `ShiftStillOpen` |
//! | `RepoError::InvalidShiftRange` | `InvalidShiftRange` |
//! | `RepoError::NotAnOperator` | `NotAnOperator` |
//! | `RepoError::CancelledRecordLocked` | `CancelledRecordLocked` |
//! | `StorageError` | `StorageError` |

pub use shared::error::{AppError, AppResult, ErrorCode};

use crate::db::StorageError;
use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match err {
            RepoError::Validation(_) => AppError::validation(message),
            RepoError::NotFound(_) => AppError::with_message(ErrorCode::NotFound, message),
            RepoError::Duplicate(_) => AppError::already_exists(message),
            RepoError::ShiftStillOpen(shift_id) => {
                AppError::with_message(ErrorCode::ShiftStillOpen, message)
                    .with_detail("shift_id", shift_id)
            }
            RepoError::InvalidShiftRange {
                opened_at,
                closed_at,
            } => AppError::with_message(ErrorCode::InvalidShiftRange, message)
                .with_detail("opened_at", opened_at.to_rfc3339())
                .with_detail("closed_at", closed_at.to_rfc3339()),
            RepoError::NotAnOperator(user_id) => {
                AppError::with_message(ErrorCode::NotAnOperator, message)
                    .with_detail("user_id", user_id)
            }
            RepoError::CancelledRecordLocked(record_id) => {
                AppError::with_message(ErrorCode::CancelledRecordLocked, message)
                    .with_detail("record_id", record_id.as_str())
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage error");
        AppError::storage(err.to_string())
    }
}
