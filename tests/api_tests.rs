//! API integration tests
//!
//! These run against a live server with a seeded admin employee.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a customer, returning its id
async fn create_customer(client: &Client, token: &str) -> i64 {
    let response = client
        .post(format!("{}/customers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "first_name": "Test",
            "last_name": "Customer",
            "phone": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No customer ID")
}

/// Helper to create an available equipment unit, returning its id
async fn create_equipment(client: &Client, token: &str, daily_rate: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Test Trencher",
            "equipment_type": "Excavation",
            "daily_rate": daily_rate
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/rentals", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_dashboard() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_revenue"].is_string() || body["total_revenue"].is_number());
    assert!(body["active_rentals"].is_number());
    assert!(body["overdue_rentals"].is_number());
    assert!(body["most_rented_equipment"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_delete_unarchived_customer_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let customer_id = create_customer(&client, &token).await;

    // Deleting before archiving must be rejected
    let response = client
        .delete(format!("{}/customers/{}", BASE_URL, customer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Archive, then delete succeeds (no rentals yet)
    let response = client
        .post(format!("{}/customers/{}/archive", BASE_URL, customer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to archive");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/customers/{}", BASE_URL, customer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_rental_round_trip() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let customer_id = create_customer(&client, &token).await;
    let equipment_id = create_equipment(&client, &token, "20.00").await;

    let today = chrono::Utc::now().date_naive();
    let due = today + chrono::Duration::days(7);

    // Create rental: 20.00/day for 3 days => subtotal 60.00
    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "due_date": due.to_string(),
            "items": [{ "equipment_id": equipment_id, "days_rented": 3 }]
        }))
        .send()
        .await
        .expect("Failed to create rental");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let rental_id = body["id"].as_i64().expect("No rental ID");
    assert_eq!(body["subtotal"], "60.00");
    assert_eq!(body["status"], "active");

    // Equipment is now rented
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get equipment");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "rented");

    // Creating another rental over the same unit is rejected
    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "due_date": due.to_string(),
            "items": [{ "equipment_id": equipment_id, "days_rented": 1 }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return on time: no late fee, total stays at the subtotal
    let response = client
        .post(format!("{}/rentals/{}/return", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to return rental");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "returned");
    assert_eq!(body["rental"]["late_fee"], "0.00");
    assert_eq!(body["rental"]["total_cost"], "60.00");
    assert_eq!(body["rental"]["status"], "completed");

    // Equipment is available again
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get equipment");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "available");

    // A second return is a rejected no-op
    let response = client
        .post(format!("{}/rentals/{}/return", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_reactivation_resets_billing() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let customer_id = create_customer(&client, &token).await;
    let equipment_id = create_equipment(&client, &token, "35.00").await;

    let today = chrono::Utc::now().date_naive();
    let due = today + chrono::Duration::days(2);

    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "due_date": due.to_string(),
            "items": [{ "equipment_id": equipment_id, "days_rented": 2 }]
        }))
        .send()
        .await
        .expect("Failed to create rental");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let rental_id = body["id"].as_i64().expect("No rental ID");

    // Reactivating an active rental is rejected
    let response = client
        .post(format!("{}/rentals/{}/reactivate", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return, then reactivate
    let response = client
        .post(format!("{}/rentals/{}/return", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to return rental");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/rentals/{}/reactivate", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to reactivate rental");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["rental"]["status"], "active");
    assert_eq!(body["rental"]["late_fee"], "0.00");
    assert_eq!(body["rental"]["return_date"], Value::Null);
    assert_eq!(body["rental"]["total_cost"], body["rental"]["subtotal"]);

    // Equipment went back out
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get equipment");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "rented");
}

#[tokio::test]
#[ignore]
async fn test_archive_equipment_on_active_rental_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let customer_id = create_customer(&client, &token).await;
    let equipment_id = create_equipment(&client, &token, "15.00").await;

    let today = chrono::Utc::now().date_naive();
    let due = today + chrono::Duration::days(5);

    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "due_date": due.to_string(),
            "items": [{ "equipment_id": equipment_id, "days_rented": 5 }]
        }))
        .send()
        .await
        .expect("Failed to create rental");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let rental_id = body["id"].as_i64().expect("No rental ID");

    // Archiving while on an active rental is rejected
    let response = client
        .post(format!("{}/equipment/{}/archive", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // After returning, archiving works but deletion is still blocked by
    // the rental history
    let response = client
        .post(format!("{}/rentals/{}/return", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to return rental");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/equipment/{}/archive", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to archive equipment");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_rental_with_empty_items_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let customer_id = create_customer(&client, &token).await;

    let today = chrono::Utc::now().date_naive();
    let due = today + chrono::Duration::days(3);

    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": customer_id,
            "due_date": due.to_string(),
            "items": []
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
