//! Cancellation audit log entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId};

/// One cancelled record, appended when a record is cancelled and never pruned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedRecordEntry {
    pub id: RecordId,
    #[serde(rename = "deletedAt")]
    pub deleted_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    /// Record as it looked right after cancellation
    pub record: Record,
}
