//! Dashboard endpoint

use axum::{extract::State, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{error::AppResult, models::enums::RentalStatus};

use super::AuthenticatedEmployee;

/// Dashboard response: shop-wide metrics for the landing view
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Revenue over all rentals ever recorded
    pub total_revenue: Decimal,
    /// Late fees charged across all returned rentals
    pub total_late_fees: Decimal,
    /// Open rentals not yet past due
    pub active_rentals: i64,
    /// Open rentals past their due date (derived from dates, not from the
    /// stored status)
    pub overdue_rentals: i64,
    /// Returned rentals
    pub completed_rentals: i64,
    /// Top five most-rented units
    pub most_rented_equipment: Vec<EquipmentUsage>,
    /// Overdue rentals with customer contact info, oldest due date first
    pub overdue: Vec<OverdueRental>,
    /// Ten most recent rentals
    pub recent_rentals: Vec<RecentRental>,
}

/// Rental count and revenue for one unit
#[derive(Serialize, FromRow, ToSchema)]
pub struct EquipmentUsage {
    pub name: String,
    pub equipment_type: String,
    pub rental_count: i64,
    pub total_revenue: Decimal,
}

/// One overdue rental on the dashboard
#[derive(Serialize, FromRow, ToSchema)]
pub struct OverdueRental {
    pub id: i32,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub subtotal: Decimal,
    pub late_fee: Decimal,
    pub total_cost: Decimal,
    /// Fee that would be charged if the rental came back today
    #[sqlx(default)]
    pub projected_late_fee: Decimal,
    pub days_overdue: i32,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    /// Comma-separated names of the equipment on the rental
    pub equipment_list: String,
}

/// One entry of the recent-rentals feed
#[derive(Serialize, FromRow, ToSchema)]
pub struct RecentRental {
    pub id: i32,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Effective status, with Overdue derived from the due date
    pub status: RentalStatus,
    pub total_cost: Decimal,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub employee_first_name: String,
    pub employee_last_name: String,
}

/// Get the dashboard metrics
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.services.stats.get_dashboard().await?;
    Ok(Json(dashboard))
}
