//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, customers, equipment, health, rentals, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearShed API",
        version = "0.1.0",
        description = "Equipment Rental Shop Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Dashboard
        stats::get_dashboard,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::get_customer_rentals,
        customers::create_customer,
        customers::update_customer,
        customers::archive_customer,
        customers::unarchive_customer,
        customers::delete_customer,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::archive_equipment,
        equipment::unarchive_equipment,
        equipment::delete_equipment,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::return_rental,
        rentals::reactivate_rental,
        rentals::delete_rental,
    ),
    components(
        schemas(
            // Errors
            crate::error::ErrorResponse,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::employee::EmployeeInfo,
            // Dashboard
            stats::DashboardResponse,
            stats::EquipmentUsage,
            stats::OverdueRental,
            stats::RecentRental,
            // Enums
            crate::models::enums::RentalStatus,
            crate::models::enums::AvailabilityStatus,
            crate::models::enums::ConditionStatus,
            crate::models::enums::RentalListFilter,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CustomerSummary,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentSummary,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Rentals
            crate::models::rental::Rental,
            crate::models::rental::RentalSummary,
            crate::models::rental::RentalLineItem,
            crate::models::rental::RentalDetails,
            crate::models::rental::CreateRental,
            crate::models::rental::CreateRentalItem,
            rentals::RentalTransitionResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Employee authentication"),
        (name = "dashboard", description = "Shop metrics"),
        (name = "customers", description = "Customer catalog"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "rentals", description = "Rental ledger"),
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router with Swagger UI
pub fn create_openapi_router() -> Router {
    Router::new().merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}
