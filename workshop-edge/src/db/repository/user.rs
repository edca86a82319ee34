//! User Repository
//!
//! Role changes and deletions of an operator close the operator's open
//! shift in the same batch as the user write.

use shared::models::{User, UserCreate, UserRole, UserUpdate};
use shared::util;

use super::shift::SHIFTS;
use super::{BaseRepository, RepoError, RepoResult};
use crate::db::{Collection, Store, WriteBatch, keys};
use crate::shifts::transitions;

pub(crate) const USERS: Collection<User> = Collection::new(keys::USERS);

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub fn find_all(&self) -> Vec<User> {
        USERS.load(self.base.store())
    }

    pub fn find_by_id(&self, id: i64) -> Option<User> {
        self.find_all().into_iter().find(|u| u.id == id)
    }

    pub fn find_by_role(&self, role: UserRole) -> Vec<User> {
        self.find_all()
            .into_iter()
            .filter(|u| u.role == role)
            .collect()
    }

    pub fn operators(&self) -> Vec<User> {
        self.find_by_role(UserRole::Operator)
    }

    pub fn masters(&self) -> Vec<User> {
        self.find_by_role(UserRole::Master)
    }

    pub fn clients(&self) -> Vec<User> {
        self.find_by_role(UserRole::Client)
    }

    /// Masters who perform `service_id`
    pub fn masters_for_service(&self, service_id: i64) -> Vec<User> {
        self.masters()
            .into_iter()
            .filter(|u| u.offers_service(service_id))
            .collect()
    }

    pub fn create(&self, data: UserCreate) -> RepoResult<User> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(RepoError::Validation("User name is required".into()));
        }

        let user = User {
            id: util::snowflake_id(),
            name: name.to_string(),
            role: data.role.unwrap_or_default(),
            services: data.services,
            current_shift: None,
            created_at: Some(util::now()),
        };
        let mut users = self.find_all();
        users.push(user.clone());
        USERS.save(self.base.store(), &users);
        Ok(user)
    }

    /// Partial update; `None` when the id is unknown.
    ///
    /// An operator whose role actually changes gets their open shift closed.
    pub fn update(&self, id: i64, data: UserUpdate) -> RepoResult<Option<User>> {
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation("User name is required".into()));
        }

        let store = self.base.store();
        let mut users = self.find_all();
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        let mut batch = WriteBatch::new();

        let old_role = users[index].role;
        if let Some(new_role) = data.role
            && old_role == UserRole::Operator
            && new_role != old_role
        {
            let mut shifts = SHIFTS.load(store);
            if let Some(open_id) = transitions::find_open(&shifts, id).map(|s| s.id) {
                let note = transitions::role_change_note(old_role, new_role);
                transitions::close_shift(&mut shifts, &mut users, open_id, &note, util::now());
                SHIFTS.stage(&mut batch, &shifts);
                tracing::info!(user_id = id, shift_id = open_id, %old_role, %new_role, "Closed shift on role change");
            }
        }

        let user = &mut users[index];
        if let Some(name) = data.name {
            user.name = name.trim().to_string();
        }
        if let Some(role) = data.role {
            user.role = role;
            if role != UserRole::Operator {
                user.current_shift = None;
            }
        }
        if let Some(services) = data.services {
            user.services = services;
        }
        let updated = user.clone();

        USERS.stage(&mut batch, &users);
        store.commit(batch);
        Ok(Some(updated))
    }

    /// Remove a user, closing an operator's open shift first.
    ///
    /// Returns whether a user was removed.
    pub fn delete(&self, id: i64) -> bool {
        let store = self.base.store();
        let mut users = self.find_all();
        let Some(user) = users.iter().find(|u| u.id == id) else {
            return false;
        };
        let mut batch = WriteBatch::new();

        if user.is_operator() {
            let mut shifts = SHIFTS.load(store);
            if let Some(open_id) = transitions::find_open(&shifts, id).map(|s| s.id) {
                transitions::close_shift(
                    &mut shifts,
                    &mut users,
                    open_id,
                    transitions::USER_DELETED_NOTE,
                    util::now(),
                );
                SHIFTS.stage(&mut batch, &shifts);
                tracing::info!(user_id = id, shift_id = open_id, "Closed shift of deleted operator");
            }
        }

        users.retain(|u| u.id != id);
        USERS.stage(&mut batch, &users);
        store.commit(batch);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ShiftRepository;
    use crate::shifts::ShiftLifecycle;

    fn create(repo: &UserRepository, name: &str, role: UserRole) -> User {
        repo.create(UserCreate {
            name: name.into(),
            role: Some(role),
            services: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_create_defaults_to_client() {
        let repo = UserRepository::new(Store::in_memory());
        let user = repo
            .create(UserCreate {
                name: " Ирина ".into(),
                role: None,
                services: vec![],
            })
            .unwrap();
        assert_eq!(user.name, "Ирина");
        assert_eq!(user.role, UserRole::Client);
        assert_eq!(repo.clients().len(), 1);
        assert!(repo.find_by_id(user.id).is_some());

        let err = repo.create(UserCreate::default());
        assert!(matches!(err, Err(RepoError::Validation(_))));
    }

    #[test]
    fn test_masters_for_service() {
        let repo = UserRepository::new(Store::in_memory());
        let ivan = repo
            .create(UserCreate {
                name: "Иван".into(),
                role: Some(UserRole::Master),
                services: vec![1001, 1002],
            })
            .unwrap();
        repo.create(UserCreate {
            name: "Сергей".into(),
            role: Some(UserRole::Master),
            services: vec![1003],
        })
        .unwrap();

        let masters = repo.masters_for_service(1002);
        assert_eq!(masters.len(), 1);
        assert_eq!(masters[0].id, ivan.id);
        assert_eq!(repo.masters().len(), 2);
    }

    #[test]
    fn test_role_change_closes_open_shift() {
        let store = Store::in_memory();
        let users = UserRepository::new(store.clone());
        let lifecycle = ShiftLifecycle::new(store.clone());
        let op = create(&users, "Виктор", UserRole::Operator);
        let shift = lifecycle.open(op.id).unwrap().unwrap();

        let updated = users
            .update(
                op.id,
                UserUpdate {
                    role: Some(UserRole::Master),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.role, UserRole::Master);
        assert_eq!(updated.current_shift, None);

        let stored = ShiftRepository::new(store).find_by_id(shift.id).unwrap();
        assert!(!stored.is_open());
        assert_eq!(
            stored.notes,
            "Автоматическое закрытие: изменение роли пользователя с operator на master"
        );
    }

    #[test]
    fn test_rename_keeps_shift_open() {
        let store = Store::in_memory();
        let users = UserRepository::new(store.clone());
        let lifecycle = ShiftLifecycle::new(store.clone());
        let op = create(&users, "Виктор", UserRole::Operator);
        let shift = lifecycle.open(op.id).unwrap().unwrap();

        let updated = users
            .update(
                op.id,
                UserUpdate {
                    name: Some("Виктор С.".into()),
                    role: Some(UserRole::Operator),
                    services: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.current_shift, Some(shift.id));
        assert!(ShiftRepository::new(store).find_by_id(shift.id).unwrap().is_open());
    }

    #[test]
    fn test_delete_operator_closes_shift() {
        let store = Store::in_memory();
        let users = UserRepository::new(store.clone());
        let lifecycle = ShiftLifecycle::new(store.clone());
        let op = create(&users, "Елена", UserRole::Operator);
        let shift = lifecycle.open(op.id).unwrap().unwrap();

        assert!(users.delete(op.id));
        assert!(users.find_by_id(op.id).is_none());
        assert!(!users.delete(op.id));

        let stored = ShiftRepository::new(store).find_by_id(shift.id).unwrap();
        assert_eq!(stored.notes, transitions::USER_DELETED_NOTE);
        assert!(stored.closed_at.is_some());
    }

    #[test]
    fn test_update_unknown_user() {
        let repo = UserRepository::new(Store::in_memory());
        assert!(repo.update(1, UserUpdate::default()).unwrap().is_none());
    }
}
