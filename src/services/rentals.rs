//! Rental lifecycle service

use std::collections::HashSet;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RentalListFilter,
        rental::{CreateRental, Rental, RentalDetails, RentalSummary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List rentals through an enumerated filter
    pub async fn list(&self, filter: RentalListFilter) -> AppResult<Vec<RentalSummary>> {
        self.repository.rentals.list(filter).await
    }

    /// List a customer's rentals (the customer must exist)
    pub async fn list_for_customer(&self, customer_id: i32) -> AppResult<Vec<RentalSummary>> {
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.rentals.list_for_customer(customer_id).await
    }

    /// Get the full view of one rental: header plus line items
    pub async fn get_details(&self, id: i32) -> AppResult<RentalDetails> {
        let rental = self.repository.rentals.get_summary(id).await?;
        let items = self.repository.rentals.get_line_items(id).await?;
        Ok(RentalDetails { rental, items })
    }

    /// Create a rental for the authenticated employee.
    ///
    /// Field validation happens here, before any store access; the
    /// existence/availability preconditions are enforced inside the
    /// repository transaction.
    pub async fn create(&self, employee_id: i32, data: &CreateRental) -> AppResult<RentalDetails> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let rental_date = data.rental_date.unwrap_or_else(|| Utc::now().date_naive());
        if data.due_date < rental_date {
            return Err(AppError::Validation(
                "due date cannot be before the rental date".to_string(),
            ));
        }

        // One line item per unit; a duplicate would slip past the
        // availability check, which only flips the unit to Rented at the end
        // of the transaction.
        let mut seen = HashSet::new();
        for item in &data.items {
            if !seen.insert(item.equipment_id) {
                return Err(AppError::Validation(format!(
                    "equipment {} is listed more than once",
                    item.equipment_id
                )));
            }
        }

        // The creating employee comes from the auth gate; verify it still
        // resolves to an active account before writing anything.
        self.repository.employees.get_by_id(employee_id).await?;

        let rental_id = self.repository.rentals.create(employee_id, data).await?;
        self.get_details(rental_id).await
    }

    /// Return a rental, charging the late fee when past due
    pub async fn return_rental(&self, id: i32) -> AppResult<Rental> {
        self.repository.rentals.return_rental(id).await
    }

    /// Reactivate a completed rental
    pub async fn reactivate(&self, id: i32) -> AppResult<Rental> {
        self.repository.rentals.reactivate(id).await
    }

    /// Delete a returned rental and its line items
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.rentals.delete(id).await
    }
}
