//! Unified error system
//!
//! - [`ErrorCode`]: standardized numeric error codes
//! - [`AppError`]: error type with code, message and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::InvalidShiftRange);
//! let err = AppError::validation("Cancellation reason is required")
//!     .with_detail("record_id", "r-1");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
