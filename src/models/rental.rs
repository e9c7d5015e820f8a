//! Rental ledger models: rental headers, line items, and request types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::RentalStatus;

/// Rental header row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rental {
    pub id: i32,
    pub customer_id: i32,
    /// Employee who created the rental
    pub employee_id: i32,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: RentalStatus,
    pub subtotal: Decimal,
    pub late_fee: Decimal,
    /// Invariant: always equals subtotal + late_fee
    pub total_cost: Decimal,
    pub notes: Option<String>,
}

/// Rental with customer/employee names for list views.
///
/// `status` is the effective status (Overdue derived from the due date) and
/// `days_overdue` is relative to the current date; negative values mean the
/// rental is not yet due.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RentalSummary {
    pub id: i32,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: RentalStatus,
    pub subtotal: Decimal,
    pub late_fee: Decimal,
    pub total_cost: Decimal,
    pub notes: Option<String>,
    pub customer_id: i32,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: Option<String>,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub days_overdue: i32,
}

/// Line item joined with its equipment, for the rental detail view.
///
/// `daily_rate` is the snapshot taken at creation time and does not follow
/// later equipment rate changes.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RentalLineItem {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub equipment_type: String,
    pub quantity: i32,
    pub daily_rate: Decimal,
    pub days_rented: i32,
    pub line_total: Decimal,
}

/// Full rental view: header summary plus line items
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RentalDetails {
    #[serde(flatten)]
    pub rental: RentalSummary,
    pub items: Vec<RentalLineItem>,
}

/// One equipment selection in a create-rental request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRentalItem {
    pub equipment_id: i32,
    #[validate(range(min = 1, message = "days rented must be at least 1"))]
    pub days_rented: i32,
}

/// Create rental request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRental {
    pub customer_id: i32,
    /// Defaults to today when omitted
    pub rental_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "at least one equipment item is required"), nested)]
    pub items: Vec<CreateRentalItem>,
    pub notes: Option<String>,
}
