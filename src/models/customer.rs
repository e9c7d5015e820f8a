//! Customer model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Customer record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub drivers_license: Option<String>,
    /// Archived customers are hidden from active listings but keep their
    /// rental history
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Customer with aggregated rental history, for list views
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CustomerSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub is_archived: bool,
    /// Number of rentals ever created for this customer
    pub total_rentals: i64,
    /// Sum of total_cost over all of the customer's rentals
    pub total_spent: Decimal,
}

/// Create customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub drivers_license: Option<String>,
}

/// Update customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, message = "first name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last name cannot be empty"))]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub drivers_license: Option<String>,
}
