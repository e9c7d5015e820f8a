//! Customer management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerSummary, UpdateCustomer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<CustomerSummary>> {
        self.repository.customers.list(include_archived).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.customers.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.customers.update(id, data).await
    }

    pub async fn archive(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.set_archived(id, true).await
    }

    pub async fn unarchive(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.set_archived(id, false).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete(id).await
    }
}
