//! Shift Repository

use shared::models::Shift;

use super::BaseRepository;
use crate::db::{Collection, Store, keys};

pub(crate) const SHIFTS: Collection<Shift> = Collection::new(keys::SHIFTS);

#[derive(Clone)]
pub struct ShiftRepository {
    base: BaseRepository,
}

impl ShiftRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn find_all(&self) -> Vec<Shift> {
        SHIFTS.load(self.base.store())
    }

    pub fn find_by_id(&self, id: i64) -> Option<Shift> {
        self.find_all().into_iter().find(|s| s.id == id)
    }

    /// The operator's open shift
    pub fn find_open_for(&self, operator_id: i64) -> Option<Shift> {
        self.find_all()
            .into_iter()
            .find(|s| s.operator_id == operator_id && s.is_open())
    }

    /// All shifts of one operator, newest first
    pub fn find_by_operator(&self, operator_id: i64) -> Vec<Shift> {
        let mut shifts: Vec<Shift> = self
            .find_all()
            .into_iter()
            .filter(|s| s.operator_id == operator_id)
            .collect();
        shifts.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));
        shifts
    }
}
