//! Business logic services

pub mod billing;
pub mod customers;
pub mod employees;
pub mod equipment;
pub mod rentals;
pub mod stats;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub customers: customers::CustomersService,
    pub employees: employees::EmployeesService,
    pub equipment: equipment::EquipmentService,
    pub rentals: rentals::RentalsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            customers: customers::CustomersService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            rentals: rentals::RentalsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
