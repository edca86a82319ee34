//! Car history repository
//!
//! Distinct car descriptions typed into records, most recent first.

use super::BaseRepository;
use crate::db::{Collection, Store, WriteBatch, keys};

const CAR_HISTORY: Collection<String> = Collection::new(keys::CAR_HISTORY);

#[derive(Clone)]
pub struct CarHistoryRepository {
    base: BaseRepository,
}

impl CarHistoryRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn find_all(&self) -> Vec<String> {
        CAR_HISTORY.load(self.base.store())
    }

    /// Cars containing `query`, case-insensitive; blank query lists all
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.find_all()
            .into_iter()
            .filter(|car| needle.is_empty() || car.to_lowercase().contains(&needle))
            .collect()
    }

    /// Stage `car` moved to the front; `false` if there was nothing to stage
    pub fn stage_remember(&self, batch: &mut WriteBatch, car: &str) -> bool {
        let car = car.trim();
        if car.is_empty() {
            return false;
        }
        let lower = car.to_lowercase();
        let mut history = self.find_all();
        history.retain(|c| c.to_lowercase() != lower);
        history.insert(0, car.to_string());
        CAR_HISTORY.stage(batch, &history);
        true
    }

    pub fn remember(&self, car: &str) -> bool {
        let mut batch = WriteBatch::new();
        self.stage_remember(&mut batch, car) && self.base.store().commit(batch)
    }

    /// Drop every entry equal to `car`, ignoring case
    pub fn remove(&self, car: &str) -> bool {
        let lower = car.trim().to_lowercase();
        let mut history = self.find_all();
        let before = history.len();
        history.retain(|c| c.to_lowercase() != lower);
        if history.len() == before {
            return false;
        }
        CAR_HISTORY.save(self.base.store(), &history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_moves_to_front_without_duplicates() {
        let repo = CarHistoryRepository::new(Store::in_memory());
        assert!(repo.remember("Lada Vesta"));
        assert!(repo.remember("Kia Rio"));
        assert!(repo.remember("  lada vesta "));
        assert_eq!(repo.find_all(), vec!["lada vesta", "Kia Rio"]);
        assert!(!repo.remember("   "));
    }

    #[test]
    fn test_search_and_remove() {
        let repo = CarHistoryRepository::new(Store::in_memory());
        repo.remember("Lada Vesta");
        repo.remember("Kia Rio");
        assert_eq!(repo.search("RIO"), vec!["Kia Rio"]);
        assert_eq!(repo.search("").len(), 2);

        assert!(repo.remove("KIA RIO"));
        assert!(!repo.remove("Kia Rio"));
        assert_eq!(repo.find_all(), vec!["Lada Vesta"]);
    }
}
