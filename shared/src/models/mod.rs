//! Data models
//!
//! Each collection is persisted as one JSON array. Field names follow the
//! stored layout: camelCase for shifts, users and services; records keep
//! their historical mix of snake_case and camelCase.

pub mod deleted_record;
pub mod lenient;
pub mod record;
pub mod record_status;
pub mod service;
pub mod shift;
pub mod theme;
pub mod user;

// Re-exports
pub use deleted_record::*;
pub use record::*;
pub use record_status::*;
pub use service::*;
pub use shift::*;
pub use theme::*;
pub use user::*;
