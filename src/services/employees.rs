//! Authentication service for employees

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::employee::{Employee, EmployeeClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
    config: AuthConfig,
}

impl EmployeesService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate an employee by username/password and return a JWT token.
    ///
    /// Inactive accounts and unknown usernames fail with the same message as
    /// a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, Employee)> {
        let employee = self
            .repository
            .employees
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !self.verify_password(&employee, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token(&employee)?;
        Ok((token, employee))
    }

    /// Get the employee behind a set of claims
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    fn create_token(&self, employee: &Employee) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = EmployeeClaims {
            sub: employee.username.clone(),
            employee_id: employee.id,
            position: employee.position.clone(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, employee: &Employee, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&employee.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password for storage (used by seeding/administration tooling)
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
