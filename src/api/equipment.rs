//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentSummary, UpdateEquipment},
};

use super::AuthenticatedEmployee;

/// Query parameters for the equipment list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentListQuery {
    /// Include archived equipment (default: false)
    #[serde(default)]
    pub include_archived: Option<bool>,
    /// Only list units available for a new rental (default: false)
    #[serde(default)]
    pub available_only: Option<bool>,
}

/// List equipment with usage totals
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentListQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipmentSummary>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Query(query): Query<EquipmentListQuery>,
) -> AppResult<Json<Vec<EquipmentSummary>>> {
    let equipment = state
        .services
        .equipment
        .list(
            query.include_archived.unwrap_or(false),
            query.available_only.unwrap_or(false),
        )
        .await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment.
///
/// Rate changes only affect future rentals; existing line items keep their
/// snapshot.
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Archive equipment not currently on an open rental
#[utoipa::path(
    post,
    path = "/equipment/{id}/archive",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment archived", body = Equipment),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment is on an active rental")
    )
)]
pub async fn archive_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.archive(id).await?;
    Ok(Json(equipment))
}

/// Unarchive equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/unarchive",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment unarchived", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn unarchive_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.unarchive(id).await?;
    Ok(Json(equipment))
}

/// Delete archived equipment with no rental history
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment not archived or has rental history")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
