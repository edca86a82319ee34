//! Shared types for the workshop ledger
//!
//! Data models, the payment status normalizer, unified error codes and the
//! id/time helpers used by `workshop-edge`.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
