//! Employee model and JWT claims

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Employee record from the database.
///
/// Employees are managed out-of-band (seeded by deployment); the server only
/// reads them for login and rental attribution.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2), never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Public employee view returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeInfo {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
}

impl From<Employee> for EmployeeInfo {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            username: e.username,
            first_name: e.first_name,
            last_name: e.last_name,
            position: e.position,
        }
    }
}

/// JWT claims for authenticated employees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeClaims {
    pub sub: String,
    pub employee_id: i32,
    pub position: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl EmployeeClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
