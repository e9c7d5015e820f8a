//! Rental lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        enums::RentalListFilter,
        rental::{CreateRental, Rental, RentalDetails, RentalSummary},
    },
};

use super::AuthenticatedEmployee;

/// Query parameters for the rental list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RentalListQuery {
    /// Status filter: all (default), active, overdue, completed
    #[serde(default)]
    pub status: Option<RentalListFilter>,
}

/// Response for return/reactivate transitions
#[derive(Serialize, ToSchema)]
pub struct RentalTransitionResponse {
    /// Outcome, e.g. "returned" or "reactivated"
    pub status: String,
    /// Human-readable summary of the billing outcome
    pub message: String,
    /// The rental after the transition
    pub rental: Rental,
}

/// List rentals
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(RentalListQuery),
    responses(
        (status = 200, description = "Rental list", body = Vec<RentalSummary>)
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Query(query): Query<RentalListQuery>,
) -> AppResult<Json<Vec<RentalSummary>>> {
    let rentals = state
        .services
        .rentals
        .list(query.status.unwrap_or_default())
        .await?;
    Ok(Json(rentals))
}

/// Get one rental with its line items
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = RentalDetails),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.get_details(id).await?;
    Ok(Json(rental))
}

/// Create a rental.
///
/// The authenticated employee is recorded as the creator. Every selected
/// unit must be available; the whole operation applies atomically or not at
/// all.
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    request_body = CreateRental,
    responses(
        (status = 201, description = "Rental created", body = RentalDetails),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Customer or equipment not found"),
        (status = 409, description = "Equipment not available or archived")
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(claims): AuthenticatedEmployee,
    Json(data): Json<CreateRental>,
) -> AppResult<(StatusCode, Json<RentalDetails>)> {
    let rental = state
        .services
        .rentals
        .create(claims.employee_id, &data)
        .await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// Return a rental.
///
/// Charges the 10% late fee when the return is past the due date and frees
/// the equipment. A second return of the same rental is rejected.
#[utoipa::path(
    post,
    path = "/rentals/{id}/return",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental returned", body = RentalTransitionResponse),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_rental(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalTransitionResponse>> {
    let rental = state.services.rentals.return_rental(id).await?;

    let message = if rental.late_fee > rust_decimal::Decimal::ZERO {
        format!(
            "Rental returned. Late fee of {} applied (10% of subtotal).",
            rental.late_fee
        )
    } else {
        "Rental returned. No late fees.".to_string()
    };

    Ok(Json(RentalTransitionResponse {
        status: "returned".to_string(),
        message,
        rental,
    }))
}

/// Reactivate a completed rental.
///
/// Puts the equipment back out and resets billing to the subtotal; any late
/// fee charged on return is discarded.
#[utoipa::path(
    post,
    path = "/rentals/{id}/reactivate",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental reactivated", body = RentalTransitionResponse),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental is not completed")
    )
)]
pub async fn reactivate_rental(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalTransitionResponse>> {
    let rental = state.services.rentals.reactivate(id).await?;

    Ok(Json(RentalTransitionResponse {
        status: "reactivated".to_string(),
        message: "Rental reactivated; equipment is back out.".to_string(),
        rental,
    }))
}

/// Delete a returned rental and its line items
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 204, description = "Rental deleted"),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental is still active")
    )
)]
pub async fn delete_rental(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.rentals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
