//! Unified error codes for the workshop ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Record errors
//! - 5xxx: Shift errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 4xxx: Record ====================
    /// Cancelled records are locked against manual edits
    CancelledRecordLocked = 4001,

    // ==================== 5xxx: Shift ====================
    /// Operation requires a closed shift
    ShiftStillOpen = 5001,
    /// Shift opening time is not before its closing time
    InvalidShiftRange = 5002,

    // ==================== 8xxx: User ====================
    /// Operation requires a user with the operator role
    NotAnOperator = 8001,

    // ==================== 9xxx: System ====================
    /// Storage backend failure
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            ErrorCode::CancelledRecordLocked => "Cancelled record cannot be edited",

            ErrorCode::ShiftStillOpen => "Shift is still open",
            ErrorCode::InvalidShiftRange => "Shift must open before it closes",

            ErrorCode::NotAnOperator => "User is not an operator",

            ErrorCode::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            4001 => Ok(ErrorCode::CancelledRecordLocked),

            5001 => Ok(ErrorCode::ShiftStillOpen),
            5002 => Ok(ErrorCode::InvalidShiftRange),

            8001 => Ok(ErrorCode::NotAnOperator),

            9002 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
