//! Shift state transitions over loaded collections
//!
//! Pure functions on `shifts` / `users` slices. Callers load both
//! collections, apply a transition, then stage both into one
//! [`WriteBatch`](crate::db::WriteBatch), so a shift and its operator's
//! `current_shift` pointer never disagree on disk.

use chrono::{DateTime, Utc};
use shared::models::{Shift, User, UserRole};

use crate::db::repository::{RepoError, RepoResult};

/// Note written when cleanup closes a shift whose operator is gone
pub const ORPHAN_CLOSE_NOTE: &str = "Автоматическое закрытие: оператор удалён (очистка данных)";

/// Note written when an operator is deleted mid-shift
pub const USER_DELETED_NOTE: &str = "Автоматическое закрытие: пользователь удалён";

/// Note written when an operator's role changes mid-shift
pub fn role_change_note(from: UserRole, to: UserRole) -> String {
    format!("Автоматическое закрытие: изменение роли пользователя с {from} на {to}")
}

/// The operator's open shift, if any
pub fn find_open(shifts: &[Shift], operator_id: i64) -> Option<&Shift> {
    shifts
        .iter()
        .find(|s| s.operator_id == operator_id && s.is_open())
}

/// Start a shift for `operator_id` and point the operator at it.
///
/// Returns `None` without touching anything if the operator already has an
/// open shift.
pub fn open_shift(
    shifts: &mut Vec<Shift>,
    users: &mut [User],
    operator_id: i64,
    shift_id: i64,
    now: DateTime<Utc>,
) -> Option<Shift> {
    if find_open(shifts, operator_id).is_some() {
        return None;
    }

    let shift = Shift {
        id: shift_id,
        operator_id,
        opened_at: now,
        closed_at: None,
        notes: String::new(),
        revenue: 0.0,
    };
    shifts.push(shift.clone());

    if let Some(user) = users.iter_mut().find(|u| u.id == operator_id) {
        user.current_shift = Some(shift_id);
    }
    Some(shift)
}

/// Close an open shift and clear its operator's pointer.
///
/// `None` if the shift does not exist or is already closed.
pub fn close_shift(
    shifts: &mut [Shift],
    users: &mut [User],
    shift_id: i64,
    notes: &str,
    now: DateTime<Utc>,
) -> Option<Shift> {
    let shift = shifts.iter_mut().find(|s| s.id == shift_id)?;
    if !shift.is_open() {
        return None;
    }
    shift.closed_at = Some(now);
    shift.notes = notes.to_string();

    if let Some(user) = users.iter_mut().find(|u| u.id == shift.operator_id) {
        user.current_shift = None;
    }
    Some(shift.clone())
}

/// Close every open shift whose operator id matches no user; returns the count
pub fn close_orphans(shifts: &mut [Shift], users: &[User], now: DateTime<Utc>) -> usize {
    let mut closed = 0;
    for shift in shifts.iter_mut().filter(|s| s.is_open()) {
        if users.iter().any(|u| u.id == shift.operator_id) {
            continue;
        }
        shift.closed_at = Some(now);
        shift.notes = ORPHAN_CLOSE_NOTE.to_string();
        closed += 1;
    }
    closed
}

/// `opened_at` must be strictly before `closed_at`
pub fn check_range(opened_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> RepoResult<()> {
    if opened_at >= closed_at {
        return Err(RepoError::InvalidShiftRange {
            opened_at,
            closed_at,
        });
    }
    Ok(())
}
