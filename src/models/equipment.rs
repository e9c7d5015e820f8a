//! Equipment model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{AvailabilityStatus, ConditionStatus};

/// Equipment record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Free-form category, e.g. "Excavator", "Generator"
    pub equipment_type: String,
    pub description: Option<String>,
    /// Rate charged per rented day; snapshotted into each rental line item
    pub daily_rate: Decimal,
    pub availability_status: AvailabilityStatus,
    pub condition_status: ConditionStatus,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Equipment with aggregated rental history, for list views
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentSummary {
    pub id: i32,
    pub name: String,
    pub equipment_type: String,
    pub daily_rate: Decimal,
    pub availability_status: AvailabilityStatus,
    pub condition_status: ConditionStatus,
    pub is_archived: bool,
    /// How many rental line items ever referenced this unit
    pub times_rented: i64,
    /// Sum of line totals over the unit's whole history
    pub total_revenue: Decimal,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "equipment type is required"))]
    pub equipment_type: String,
    pub description: Option<String>,
    /// Must be non-negative; checked by the service layer
    pub daily_rate: Decimal,
    pub condition_status: Option<ConditionStatus>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "equipment type cannot be empty"))]
    pub equipment_type: Option<String>,
    pub description: Option<String>,
    /// Must be non-negative when present; checked by the service layer
    pub daily_rate: Option<Decimal>,
    pub condition_status: Option<ConditionStatus>,
}
