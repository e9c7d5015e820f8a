//! Customers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerSummary, UpdateCustomer},
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List customers with aggregated rental history.
    ///
    /// Archived customers are excluded unless `include_archived` is set.
    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<CustomerSummary>> {
        let rows = sqlx::query_as::<_, CustomerSummary>(
            r#"
            SELECT
                c.id, c.first_name, c.last_name, c.phone, c.email, c.city,
                c.is_archived,
                COUNT(r.id) AS total_rentals,
                COALESCE(SUM(r.total_cost), 0) AS total_spent
            FROM customer c
            LEFT JOIN rental r ON r.customer_id = c.id
            WHERE ($1 OR c.is_archived = FALSE)
            GROUP BY c.id
            ORDER BY c.last_name, c.first_name
            "#,
        )
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Create a customer
    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer
                (first_name, last_name, phone, email, address, city, state, zip_code, drivers_license)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(&data.drivers_license)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a customer (partial; absent fields keep their value)
    pub async fn update(&self, id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customer SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                address = COALESCE($6, address),
                city = COALESCE($7, city),
                state = COALESCE($8, state),
                zip_code = COALESCE($9, zip_code),
                drivers_license = COALESCE($10, drivers_license)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(&data.drivers_license)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Archive or unarchive a customer. Archiving is always allowed; it only
    /// hides the customer from active views.
    pub async fn set_archived(&self, id: i32, archived: bool) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customer SET is_archived = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Delete a customer.
    ///
    /// Only archived customers with no rental history can be deleted; the
    /// guard and the delete run in one transaction against a locked row.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customer WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))?;

        if !customer.is_archived {
            return Err(AppError::InvalidTransition(
                "Customer must be archived before deletion".to_string(),
            ));
        }

        let rental_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rental WHERE customer_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if rental_count > 0 {
            return Err(AppError::InvalidTransition(format!(
                "Customer has {} rental(s) on record and cannot be deleted",
                rental_count
            )));
        }

        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
