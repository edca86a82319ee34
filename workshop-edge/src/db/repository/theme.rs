//! Theme preference (raw text under `theme`)

use shared::models::Theme;

use super::BaseRepository;
use crate::db::{Store, WriteBatch, keys};

#[derive(Clone)]
pub struct ThemeRepository {
    base: BaseRepository,
}

impl ThemeRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn get(&self) -> Theme {
        self.base
            .store()
            .read_raw(keys::THEME)
            .map(|bytes| Theme::parse(&String::from_utf8_lossy(&bytes)))
            .unwrap_or_default()
    }

    pub fn set(&self, theme: Theme) -> bool {
        let mut batch = WriteBatch::new();
        batch.put(keys::THEME, theme.as_str().as_bytes().to_vec());
        self.base.store().commit(batch)
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_toggle() {
        let repo = ThemeRepository::new(Store::in_memory());
        assert_eq!(repo.get(), Theme::Light);
        assert_eq!(repo.toggle(), Theme::Dark);
        assert_eq!(repo.get(), Theme::Dark);
        assert!(repo.set(Theme::Light));
        assert_eq!(repo.get(), Theme::Light);
    }
}
