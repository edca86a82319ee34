//! Service record workflow
//!
//! - **lifecycle**: create / edit / cancel / confirm over the `records` key
//! - **merge**: fold imported records into the local list
//!
//! # State machine
//!
//! ```text
//! in-progress ──confirm──▶ completed
//!      │
//!      └──────cancel────▶ cancelled ──▶ deletedRecords (append)
//!
//! edit: any ──▶ normalize(text)    (cancelled source gated by policy)
//! ```

pub mod lifecycle;
pub mod merge;

// Re-exports
pub use lifecycle::RecordLifecycle;
pub use merge::merge_remote;

use std::fmt;
use std::str::FromStr;

/// Whether a manual edit may move a cancelled record to another status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelledEditPolicy {
    /// Cancelled records edit like any other
    #[default]
    Allow,
    /// Edits that move a cancelled record to another status are refused
    Reject,
}

impl CancelledEditPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for CancelledEditPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown cancelled edit policy: {other}")),
        }
    }
}

impl fmt::Display for CancelledEditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
