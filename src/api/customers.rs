//! Customer API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::customer::{CreateCustomer, Customer, CustomerSummary, UpdateCustomer},
    models::rental::RentalSummary,
};

use super::AuthenticatedEmployee;

/// Query parameters for the customer list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CustomerListQuery {
    /// Include archived customers (default: false)
    #[serde(default)]
    pub include_archived: Option<bool>,
}

/// List customers with their rental totals
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(CustomerListQuery),
    responses(
        (status = 200, description = "Customer list", body = Vec<CustomerSummary>)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Query(query): Query<CustomerListQuery>,
) -> AppResult<Json<Vec<CustomerSummary>>> {
    let customers = state
        .services
        .customers
        .list(query.include_archived.unwrap_or(false))
        .await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_by_id(id).await?;
    Ok(Json(customer))
}

/// Get a customer's rental history
#[utoipa::path(
    get,
    path = "/customers/{id}/rentals",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer's rentals", body = Vec<RentalSummary>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RentalSummary>>> {
    let rentals = state.services.rentals.list_for_customer(id).await?;
    Ok(Json(rentals))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Json(data): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.services.customers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.update(id, &data).await?;
    Ok(Json(customer))
}

/// Archive a customer (hide from active views, keep history)
#[utoipa::path(
    post,
    path = "/customers/{id}/archive",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer archived", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn archive_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.archive(id).await?;
    Ok(Json(customer))
}

/// Unarchive a customer
#[utoipa::path(
    post,
    path = "/customers/{id}/unarchive",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer unarchived", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn unarchive_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.unarchive(id).await?;
    Ok(Json(customer))
}

/// Delete an archived customer with no rental history
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer not archived or has rental history")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    AuthenticatedEmployee(_claims): AuthenticatedEmployee,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
