//! Imported record merge
//!
//! Local data wins: an imported record is kept only if no local record
//! shares its [`Record::dedup_key`].

use shared::models::{Record, RecordId};
use std::collections::HashSet;

/// Append the imported records whose key is not present locally.
///
/// Only local keys are checked, so repeats inside one import all land.
/// Id-less imports get `r-{millis + index}`, where `index` is the position
/// in `remote`. Returns how many records were appended.
pub fn merge_remote(local: &mut Vec<Record>, remote: Vec<Record>, millis: i64) -> usize {
    let local_keys: HashSet<String> = local.iter().map(Record::dedup_key).collect();
    let mut added = 0;

    for (index, mut record) in remote.into_iter().enumerate() {
        if local_keys.contains(&record.dedup_key()) {
            continue;
        }
        if record.id.is_unassigned() {
            record.id = RecordId::new(format!("r-{}", millis + index as i64));
        }
        local.push(record);
        added += 1;
    }
    added
}
