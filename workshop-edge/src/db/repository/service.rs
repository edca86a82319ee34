//! Service Repository

use shared::models::{Service, ServiceCreate, ServiceUpdate, default_catalog};
use shared::util;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::{Collection, Store, keys};

pub(crate) const SERVICES: Collection<Service> = Collection::new(keys::SERVICES);

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(format!(
            "Price cannot be negative: {price}"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// All services; an empty catalogue is seeded with the defaults first.
    ///
    /// Unparseable stored data is reported as empty and left untouched.
    pub fn find_all(&self) -> Vec<Service> {
        let Some(services) = SERVICES.load_checked(self.base.store()) else {
            return Vec::new();
        };
        if !services.is_empty() {
            return services;
        }

        let defaults = default_catalog(util::now());
        tracing::info!(count = defaults.len(), "Seeding default services");
        SERVICES.save(self.base.store(), &defaults);
        defaults
    }

    pub fn find_by_id(&self, id: i64) -> Option<Service> {
        self.find_all().into_iter().find(|s| s.id == id)
    }

    pub fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(RepoError::Validation("Service name is required".into()));
        }
        validate_price(data.price)?;

        let service = Service {
            id: util::snowflake_id(),
            name: name.to_string(),
            price: data.price,
            created_at: util::now(),
        };
        let mut services = self.find_all();
        services.push(service.clone());
        SERVICES.save(self.base.store(), &services);
        Ok(service)
    }

    /// Partial update; `None` when the id is unknown
    pub fn update(&self, id: i64, data: ServiceUpdate) -> RepoResult<Option<Service>> {
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation("Service name is required".into()));
        }
        if let Some(price) = data.price {
            validate_price(price)?;
        }

        let mut services = self.find_all();
        let Some(service) = services.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(name) = data.name {
            service.name = name.trim().to_string();
        }
        if let Some(price) = data.price {
            service.price = price;
        }
        let updated = service.clone();
        SERVICES.save(self.base.store(), &services);
        Ok(Some(updated))
    }

    /// Returns whether anything was removed
    pub fn delete(&self, id: i64) -> bool {
        let mut services = self.find_all();
        let before = services.len();
        services.retain(|s| s.id != id);
        if services.len() == before {
            return false;
        }
        SERVICES.save(self.base.store(), &services);
        true
    }
}
