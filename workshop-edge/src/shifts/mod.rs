//! Operator shifts (班次管理)
//!
//! ```text
//! (none) ──open──▶ OPEN ──close──▶ CLOSED ──edit──▶ CLOSED
//!                   ▲                  │
//!                   └──────reopen──────┘
//! ```
//!
//! An operator has at most one open shift, and `User::current_shift`
//! points at it. Every transition that touches both sides writes `shifts`
//! and `users` in one batch.

pub mod lifecycle;
pub mod transitions;

pub use lifecycle::{EditEligibility, ShiftLifecycle};
