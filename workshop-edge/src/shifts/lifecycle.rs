//! Shift lifecycle over the `shifts` and `users` collections

use shared::models::{Shift, ShiftEdit};
use shared::util;

use super::transitions;
use crate::db::repository::shift::SHIFTS;
use crate::db::repository::user::USERS;
use crate::db::repository::{RepoError, RepoResult, ShiftRepository};
use crate::db::{Store, WriteBatch};

/// Advisory answer to "should this shift still be edited?"
///
/// Edits are not blocked by it; callers decide what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEligibility {
    Editable,
    /// Close it first
    StillOpen,
    /// The operator has opened a later shift
    SupersededByNewerShift,
    /// The operator no longer exists
    OperatorMissing,
}

#[derive(Clone)]
pub struct ShiftLifecycle {
    store: Store,
    shifts: ShiftRepository,
}

impl ShiftLifecycle {
    pub fn new(store: Store) -> Self {
        Self {
            shifts: ShiftRepository::new(store.clone()),
            store,
        }
    }

    /// Open a shift for an operator.
    ///
    /// `Ok(None)` if the operator already has an open shift; nothing changes.
    pub fn open(&self, operator_id: i64) -> RepoResult<Option<Shift>> {
        let mut users = USERS.load(&self.store);
        let Some(user) = users.iter().find(|u| u.id == operator_id) else {
            return Err(RepoError::NotFound(format!("User {operator_id} not found")));
        };
        if !user.is_operator() {
            return Err(RepoError::NotAnOperator(operator_id));
        }

        let mut shifts = SHIFTS.load(&self.store);
        let Some(shift) = transitions::open_shift(
            &mut shifts,
            &mut users,
            operator_id,
            util::snowflake_id(),
            util::now(),
        ) else {
            tracing::warn!(operator_id, "Operator already has an open shift");
            return Ok(None);
        };

        let mut batch = WriteBatch::new();
        SHIFTS.stage(&mut batch, &shifts);
        USERS.stage(&mut batch, &users);
        self.store.commit(batch);

        tracing::info!(operator_id, shift_id = shift.id, "Shift opened");
        Ok(Some(shift))
    }

    /// Close an open shift; `None` if unknown or already closed
    pub fn close(&self, shift_id: i64, notes: &str) -> Option<Shift> {
        let mut shifts = SHIFTS.load(&self.store);
        let mut users = USERS.load(&self.store);
        let Some(shift) =
            transitions::close_shift(&mut shifts, &mut users, shift_id, notes, util::now())
        else {
            tracing::debug!(shift_id, "Close skipped: shift missing or already closed");
            return None;
        };

        let mut batch = WriteBatch::new();
        SHIFTS.stage(&mut batch, &shifts);
        USERS.stage(&mut batch, &users);
        self.store.commit(batch);

        tracing::info!(
            shift_id,
            operator_id = shift.operator_id,
            duration = %shift.duration_label(),
            "Shift closed"
        );
        Some(shift)
    }

    /// Rewrite the times and notes of a closed shift
    pub fn edit(&self, shift_id: i64, data: ShiftEdit) -> RepoResult<Option<Shift>> {
        let mut shifts = SHIFTS.load(&self.store);
        let Some(shift) = shifts.iter_mut().find(|s| s.id == shift_id) else {
            return Ok(None);
        };
        if shift.is_open() {
            return Err(RepoError::ShiftStillOpen(shift_id));
        }
        transitions::check_range(data.opened_at, data.closed_at)?;

        shift.opened_at = data.opened_at;
        shift.closed_at = Some(data.closed_at);
        shift.notes = data.notes;
        let edited = shift.clone();

        SHIFTS.save(&self.store, &shifts);
        tracing::info!(shift_id, "Shift edited");
        Ok(Some(edited))
    }

    /// `None` if the shift is unknown
    pub fn edit_eligibility(&self, shift_id: i64) -> Option<EditEligibility> {
        let shifts = SHIFTS.load(&self.store);
        let shift = shifts.iter().find(|s| s.id == shift_id)?;

        if shift.is_open() {
            return Some(EditEligibility::StillOpen);
        }
        if !USERS.load(&self.store).iter().any(|u| u.id == shift.operator_id) {
            return Some(EditEligibility::OperatorMissing);
        }
        let superseded = shifts
            .iter()
            .any(|s| s.operator_id == shift.operator_id && s.opened_at > shift.opened_at);
        if superseded {
            return Some(EditEligibility::SupersededByNewerShift);
        }
        Some(EditEligibility::Editable)
    }

    /// Clear `closed_at` again, keeping the notes.
    ///
    /// Refused while the operator has a different open shift.
    pub fn reopen(&self, shift_id: i64) -> RepoResult<Option<Shift>> {
        let mut shifts = SHIFTS.load(&self.store);
        let Some(target) = shifts.iter().find(|s| s.id == shift_id) else {
            return Ok(None);
        };
        if target.is_open() {
            return Ok(Some(target.clone()));
        }
        let operator_id = target.operator_id;
        if let Some(other) = transitions::find_open(&shifts, operator_id) {
            return Err(RepoError::Duplicate(format!(
                "Operator {operator_id} already has open shift {}",
                other.id
            )));
        }

        let mut users = USERS.load(&self.store);
        let mut batch = WriteBatch::new();
        let Some(shift) = shifts.iter_mut().find(|s| s.id == shift_id) else {
            return Ok(None);
        };
        shift.closed_at = None;
        let reopened = shift.clone();
        SHIFTS.stage(&mut batch, &shifts);

        if let Some(user) = users.iter_mut().find(|u| u.id == operator_id) {
            user.current_shift = Some(shift_id);
            USERS.stage(&mut batch, &users);
        }
        self.store.commit(batch);

        tracing::info!(shift_id, operator_id, "Shift reopened");
        Ok(Some(reopened))
    }

    /// Close open shifts whose operator no longer exists; returns the count
    pub fn cleanup_orphans(&self) -> usize {
        let mut shifts = SHIFTS.load(&self.store);
        let users = USERS.load(&self.store);
        let closed = transitions::close_orphans(&mut shifts, &users, util::now());
        if closed > 0 {
            SHIFTS.save(&self.store, &shifts);
            tracing::info!(closed, "Closed orphaned shifts");
        }
        closed
    }

    /// Add to the revenue of an open shift; `None` if unknown or closed
    pub fn add_revenue(&self, shift_id: i64, amount: f64) -> RepoResult<Option<Shift>> {
        if !amount.is_finite() {
            return Err(RepoError::Validation(format!("Invalid revenue amount: {amount}")));
        }
        let mut shifts = SHIFTS.load(&self.store);
        let Some(shift) = shifts.iter_mut().find(|s| s.id == shift_id && s.is_open()) else {
            tracing::debug!(shift_id, "Revenue skipped: shift missing or closed");
            return Ok(None);
        };
        shift.revenue += amount;
        let updated = shift.clone();

        SHIFTS.save(&self.store, &shifts);
        Ok(Some(updated))
    }

    pub fn find_all(&self) -> Vec<Shift> {
        self.shifts.find_all()
    }

    pub fn find_by_id(&self, shift_id: i64) -> Option<Shift> {
        self.shifts.find_by_id(shift_id)
    }

    pub fn current_shift(&self, operator_id: i64) -> Option<Shift> {
        self.shifts.find_open_for(operator_id)
    }

    /// Newest first
    pub fn shifts_for_operator(&self, operator_id: i64) -> Vec<Shift> {
        self.shifts.find_by_operator(operator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::db::repository::UserRepository;
    use chrono::{Duration, Utc};
    use shared::models::{OPEN_SHIFT_LABEL, User, UserCreate, UserRole};
    use std::sync::Arc;

    fn setup() -> (Store, UserRepository, ShiftLifecycle) {
        let store = Store::in_memory();
        (
            store.clone(),
            UserRepository::new(store.clone()),
            ShiftLifecycle::new(store),
        )
    }

    fn add_user(users: &UserRepository, name: &str, role: UserRole) -> User {
        users
            .create(UserCreate {
                name: name.into(),
                role: Some(role),
                services: vec![],
            })
            .unwrap()
    }

    #[test]
    fn test_open_sets_current_shift() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);

        let shift = lc.open(op.id).unwrap().unwrap();
        assert!(shift.is_open());
        assert_eq!(shift.notes, "");
        assert_eq!(shift.revenue, 0.0);
        assert_eq!(users.find_by_id(op.id).unwrap().current_shift, Some(shift.id));
        assert_eq!(lc.current_shift(op.id).unwrap().id, shift.id);
        assert_eq!(shift.duration_label(), OPEN_SHIFT_LABEL);
    }

    #[test]
    fn test_second_open_returns_none() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        lc.open(op.id).unwrap().unwrap();

        assert!(lc.open(op.id).unwrap().is_none());
        assert_eq!(lc.find_all().len(), 1);
    }

    #[test]
    fn test_open_requires_existing_operator() {
        let (_, users, lc) = setup();
        let master = add_user(&users, "Иван", UserRole::Master);

        assert!(matches!(lc.open(12345), Err(RepoError::NotFound(_))));
        assert!(matches!(lc.open(master.id), Err(RepoError::NotAnOperator(_))));
        assert!(lc.find_all().is_empty());
    }

    #[test]
    fn test_close_clears_pointer() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let shift = lc.open(op.id).unwrap().unwrap();

        let closed = lc.close(shift.id, "Смена сдана").unwrap();
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.notes, "Смена сдана");
        assert_eq!(users.find_by_id(op.id).unwrap().current_shift, None);
        assert!(lc.close(shift.id, "again").is_none());
        assert_eq!(lc.find_by_id(shift.id).unwrap().notes, "Смена сдана");
    }

    #[test]
    fn test_close_is_all_or_nothing() {
        let backend = Arc::new(MemoryStore::new());
        let store = Store::new(backend.clone());
        let users = UserRepository::new(store.clone());
        let lc = ShiftLifecycle::new(store);
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let shift = lc.open(op.id).unwrap().unwrap();

        backend.set_reject_writes(true);
        assert!(lc.close(shift.id, "x").is_some());
        assert!(lc.find_by_id(shift.id).unwrap().is_open());
        assert_eq!(users.find_by_id(op.id).unwrap().current_shift, Some(shift.id));
    }

    #[test]
    fn test_edit_rejects_bad_range_without_change() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let shift = lc.open(op.id).unwrap().unwrap();

        let t = Utc::now();
        let edit = ShiftEdit {
            opened_at: t - Duration::hours(8),
            closed_at: t,
            notes: "правка".into(),
        };
        assert!(matches!(
            lc.edit(shift.id, edit.clone()),
            Err(RepoError::ShiftStillOpen(_))
        ));

        let closed = lc.close(shift.id, "").unwrap();
        let bad = ShiftEdit {
            opened_at: t,
            closed_at: t,
            notes: "bad".into(),
        };
        assert!(matches!(
            lc.edit(shift.id, bad),
            Err(RepoError::InvalidShiftRange { .. })
        ));
        assert_eq!(lc.find_by_id(shift.id).unwrap(), closed);

        let edited = lc.edit(shift.id, edit).unwrap().unwrap();
        assert_eq!(edited.duration_label(), "8ч 0м");
        assert_eq!(edited.notes, "правка");
    }

    #[test]
    fn test_edit_eligibility() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let first = lc.open(op.id).unwrap().unwrap();
        assert_eq!(lc.edit_eligibility(first.id), Some(EditEligibility::StillOpen));

        lc.close(first.id, "");
        assert_eq!(lc.edit_eligibility(first.id), Some(EditEligibility::Editable));

        std::thread::sleep(std::time::Duration::from_millis(5));
        lc.open(op.id).unwrap().unwrap();
        assert_eq!(
            lc.edit_eligibility(first.id),
            Some(EditEligibility::SupersededByNewerShift)
        );
        assert_eq!(lc.edit_eligibility(1), None);
    }

    #[test]
    fn test_reopen() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let first = lc.open(op.id).unwrap().unwrap();
        lc.close(first.id, "итог");

        let reopened = lc.reopen(first.id).unwrap().unwrap();
        assert!(reopened.is_open());
        assert_eq!(reopened.notes, "итог");
        assert_eq!(users.find_by_id(op.id).unwrap().current_shift, Some(first.id));

        // a second closed shift cannot be reopened while the first is open
        lc.close(first.id, "итог");
        let second = lc.open(op.id).unwrap().unwrap();
        lc.close(second.id, "");
        lc.reopen(second.id).unwrap();
        assert!(matches!(lc.reopen(first.id), Err(RepoError::Duplicate(_))));
    }

    #[test]
    fn test_cleanup_orphans_after_user_removed() {
        let (store, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let shift = lc.open(op.id).unwrap().unwrap();

        // drop the user without going through delete, as stale data would
        let remaining: Vec<User> = users.find_all().into_iter().filter(|u| u.id != op.id).collect();
        USERS.save(&store, &remaining);

        assert_eq!(lc.cleanup_orphans(), 1);
        let stored = lc.find_by_id(shift.id).unwrap();
        assert!(!stored.is_open());
        assert_eq!(stored.notes, transitions::ORPHAN_CLOSE_NOTE);
        assert_eq!(lc.cleanup_orphans(), 0);
        assert_eq!(lc.edit_eligibility(shift.id), Some(EditEligibility::OperatorMissing));
    }

    #[test]
    fn test_add_revenue_only_on_open_shift() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let shift = lc.open(op.id).unwrap().unwrap();

        lc.add_revenue(shift.id, 1500.0).unwrap();
        let updated = lc.add_revenue(shift.id, 2500.0).unwrap().unwrap();
        assert_eq!(updated.revenue, 4000.0);

        lc.close(shift.id, "");
        assert!(lc.add_revenue(shift.id, 100.0).unwrap().is_none());
        assert_eq!(lc.find_by_id(shift.id).unwrap().revenue, 4000.0);
        assert!(lc.add_revenue(shift.id, f64::NAN).is_err());
    }

    #[test]
    fn test_shifts_for_operator_newest_first() {
        let (_, users, lc) = setup();
        let op = add_user(&users, "Ольга", UserRole::Operator);
        let first = lc.open(op.id).unwrap().unwrap();
        lc.close(first.id, "");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = lc.open(op.id).unwrap().unwrap();

        let ids: Vec<i64> = lc.shifts_for_operator(op.id).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
