//! Demo data (演示数据)
//!
//! Fills an installation with a small catalogue and staff so the workflows
//! can be tried by hand. Runs additively; existing data is kept.

use shared::models::{ServiceCreate, UserCreate, UserRole};

use crate::db::Store;
use crate::db::repository::{RepoResult, ServiceRepository, UserRepository};
use crate::shifts::ShiftLifecycle;

const DEMO_SERVICES: [(&str, f64); 6] = [
    ("Замена масла", 1500.0),
    ("Замена тормозных колодок", 3000.0),
    ("Техническое обслуживание", 2500.0),
    ("Диагностика", 500.0),
    ("Протирка фар", 800.0),
    ("Полировка кузова", 4000.0),
];

/// Master name and indexes into [`DEMO_SERVICES`]
const DEMO_MASTERS: [(&str, [usize; 3]); 3] = [
    ("Иван Петров", [0, 1, 3]),
    ("Сергей Сидоров", [1, 2, 4]),
    ("Алексей Иванов", [0, 3, 5]),
];

const DEMO_OPERATORS: [&str; 3] = ["Виктор Смирнов", "Елена Волкова", "Николай Соколов"];

const DEMO_CLIENTS: [&str; 3] = ["Александр Морозов", "Ирина Лебедева", "Дмитрий Козлов"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub services: usize,
    pub masters: usize,
    pub operators: usize,
    pub clients: usize,
    /// Shift opened for the first operator
    pub shift_id: Option<i64>,
}

pub fn seed_demo_data(store: &Store) -> RepoResult<SeedSummary> {
    let services = ServiceRepository::new(store.clone());
    let users = UserRepository::new(store.clone());
    let shifts = ShiftLifecycle::new(store.clone());
    let mut summary = SeedSummary::default();

    let mut service_ids = Vec::with_capacity(DEMO_SERVICES.len());
    for (name, price) in DEMO_SERVICES {
        let service = services.create(ServiceCreate {
            name: name.to_string(),
            price,
        })?;
        service_ids.push(service.id);
    }
    summary.services = service_ids.len();

    for (name, picks) in DEMO_MASTERS {
        users.create(UserCreate {
            name: name.to_string(),
            role: Some(UserRole::Master),
            services: picks.iter().map(|&i| service_ids[i]).collect(),
        })?;
        summary.masters += 1;
    }

    let mut operator_ids = Vec::with_capacity(DEMO_OPERATORS.len());
    for name in DEMO_OPERATORS {
        let user = users.create(UserCreate {
            name: name.to_string(),
            role: Some(UserRole::Operator),
            services: vec![],
        })?;
        operator_ids.push(user.id);
    }
    summary.operators = operator_ids.len();

    for name in DEMO_CLIENTS {
        users.create(UserCreate {
            name: name.to_string(),
            role: Some(UserRole::Client),
            services: vec![],
        })?;
        summary.clients += 1;
    }

    if let Some(&first) = operator_ids.first() {
        summary.shift_id = shifts.open(first)?.map(|s| s.id);
    }

    tracing::info!(?summary, "Demo data seeded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_demo_data() {
        let store = Store::in_memory();
        let summary = seed_demo_data(&store).unwrap();
        assert_eq!(summary.services, 6);
        assert_eq!(summary.masters, 3);
        assert_eq!(summary.operators, 3);
        assert_eq!(summary.clients, 3);

        let users = UserRepository::new(store.clone());
        let masters = users.masters();
        assert!(masters.iter().all(|m| m.services.len() == 3));

        let operators = users.operators();
        let shift_id = summary.shift_id.unwrap();
        let with_shift: Vec<_> = operators
            .iter()
            .filter(|o| o.current_shift.is_some())
            .collect();
        assert_eq!(with_shift.len(), 1);
        assert_eq!(with_shift[0].current_shift, Some(shift_id));

        // default catalogue plus the demo entries
        assert_eq!(ServiceRepository::new(store).find_all().len(), 11);
    }
}
