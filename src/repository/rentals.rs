//! Rental ledger repository.
//!
//! Every state transition (create, return, reactivate, delete) runs as a
//! single transaction with the affected rental and equipment rows locked
//! `FOR UPDATE`, so conflicting requests over the same rows serialize
//! instead of interleaving. A failure at any point rolls the whole
//! operation back.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{AvailabilityStatus, RentalListFilter, RentalStatus},
        equipment::Equipment,
        rental::{CreateRental, Rental, RentalLineItem, RentalSummary},
    },
    services::billing,
};

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

const SUMMARY_COLUMNS: &str = r#"
    r.id, r.rental_date, r.due_date, r.return_date, r.status,
    r.subtotal, r.late_fee, r.total_cost, r.notes,
    r.customer_id,
    c.first_name AS customer_first_name,
    c.last_name AS customer_last_name,
    c.phone AS customer_phone,
    e.first_name AS employee_first_name,
    e.last_name AS employee_last_name,
    (CURRENT_DATE - r.due_date) AS days_overdue
"#;

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List rentals, newest first, with customer and employee names.
    ///
    /// The filter maps to one of a fixed set of predicates; see
    /// [`RentalListFilter::predicate`].
    pub async fn list(&self, filter: RentalListFilter) -> AppResult<Vec<RentalSummary>> {
        let query = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM rental r
            JOIN customer c ON c.id = r.customer_id
            JOIN employee e ON e.id = r.employee_id
            WHERE {}
            ORDER BY r.rental_date DESC, r.id DESC
            "#,
            filter.predicate(),
        );

        let rows = sqlx::query_as::<_, RentalSummary>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(with_effective_status).collect())
    }

    /// List rentals for one customer, newest first
    pub async fn list_for_customer(&self, customer_id: i32) -> AppResult<Vec<RentalSummary>> {
        let query = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM rental r
            JOIN customer c ON c.id = r.customer_id
            JOIN employee e ON e.id = r.employee_id
            WHERE r.customer_id = $1
            ORDER BY r.rental_date DESC, r.id DESC
            "#,
        );

        let rows = sqlx::query_as::<_, RentalSummary>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(with_effective_status).collect())
    }

    /// Get one rental summary with names and derived status
    pub async fn get_summary(&self, id: i32) -> AppResult<RentalSummary> {
        let query = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM rental r
            JOIN customer c ON c.id = r.customer_id
            JOIN employee e ON e.id = r.employee_id
            WHERE r.id = $1
            "#,
        );

        sqlx::query_as::<_, RentalSummary>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(with_effective_status)
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))
    }

    /// Get the line items of a rental, joined with their equipment
    pub async fn get_line_items(&self, rental_id: i32) -> AppResult<Vec<RentalLineItem>> {
        let rows = sqlx::query_as::<_, RentalLineItem>(
            r#"
            SELECT
                rd.id, rd.equipment_id,
                eq.name AS equipment_name,
                eq.equipment_type,
                rd.quantity, rd.daily_rate, rd.days_rented, rd.line_total
            FROM rental_detail rd
            JOIN equipment eq ON eq.id = rd.equipment_id
            WHERE rd.rental_id = $1
            ORDER BY rd.id
            "#,
        )
        .bind(rental_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get the raw rental row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rental WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))
    }

    /// Create a rental.
    ///
    /// Snapshots each unit's current daily rate into a line item, computes
    /// the subtotal, inserts the header with status Active, and flips every
    /// unit to Rented. Equipment rows are locked first, so two concurrent
    /// creations over the same unit resolve to one success and one
    /// not-available rejection.
    pub async fn create(&self, employee_id: i32, data: &CreateRental) -> AppResult<i32> {
        let today = Utc::now().date_naive();
        let rental_date = data.rental_date.unwrap_or(today);

        let mut tx = self.pool.begin().await?;

        let customer_archived: bool = sqlx::query_scalar(
            "SELECT is_archived FROM customer WHERE id = $1",
        )
        .bind(data.customer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Customer with id {} not found", data.customer_id))
        })?;

        if customer_archived {
            return Err(AppError::Conflict(
                "Customer is archived and cannot start a new rental".to_string(),
            ));
        }

        let mut subtotal = Decimal::ZERO;
        let mut lines: Vec<(i32, Decimal, i32, Decimal)> = Vec::with_capacity(data.items.len());

        // Lock equipment rows in id order so concurrent creations over
        // overlapping selections cannot deadlock
        let mut items: Vec<_> = data.items.iter().collect();
        items.sort_by_key(|item| item.equipment_id);

        for item in items {
            let equipment = sqlx::query_as::<_, Equipment>(
                "SELECT * FROM equipment WHERE id = $1 FOR UPDATE",
            )
            .bind(item.equipment_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Equipment with id {} not found", item.equipment_id))
            })?;

            if equipment.is_archived {
                return Err(AppError::Conflict(format!(
                    "Equipment '{}' is archived and cannot be rented",
                    equipment.name
                )));
            }
            if equipment.availability_status != AvailabilityStatus::Available {
                return Err(AppError::Conflict(format!(
                    "Equipment '{}' is not available",
                    equipment.name
                )));
            }

            let line_total = billing::line_total(equipment.daily_rate, item.days_rented);
            subtotal += line_total;
            lines.push((equipment.id, equipment.daily_rate, item.days_rented, line_total));
        }

        let rental_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO rental
                (customer_id, employee_id, rental_date, due_date, status,
                 subtotal, late_fee, total_cost, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(data.customer_id)
        .bind(employee_id)
        .bind(rental_date)
        .bind(data.due_date)
        .bind(RentalStatus::Active)
        .bind(subtotal)
        .bind(Decimal::ZERO)
        .bind(subtotal)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        for (equipment_id, daily_rate, days_rented, line_total) in &lines {
            sqlx::query(
                r#"
                INSERT INTO rental_detail
                    (rental_id, equipment_id, quantity, daily_rate, days_rented, line_total)
                VALUES ($1, $2, 1, $3, $4, $5)
                "#,
            )
            .bind(rental_id)
            .bind(equipment_id)
            .bind(daily_rate)
            .bind(days_rented)
            .bind(line_total)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE equipment SET availability_status = $2 WHERE id = $1")
                .bind(equipment_id)
                .bind(AvailabilityStatus::Rented)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(rental_id)
    }

    /// Return a rental (Active/Overdue -> Completed).
    ///
    /// Sets the return date to today, charges the late fee when past due,
    /// and frees every referenced unit. Returning an already-completed
    /// rental is rejected without touching anything.
    pub async fn return_rental(&self, id: i32) -> AppResult<Rental> {
        let today = Utc::now().date_naive();

        let mut tx = self.pool.begin().await?;

        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rental WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))?;

        if rental.status == RentalStatus::Completed {
            return Err(AppError::InvalidTransition(
                "This rental has already been returned".to_string(),
            ));
        }

        Self::lock_rental_equipment(&mut tx, id).await?;

        let late_fee = billing::late_fee(rental.subtotal, rental.due_date, today);
        let total_cost = billing::total_cost(rental.subtotal, late_fee);

        let updated = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rental
            SET return_date = $2, status = $3, late_fee = $4, total_cost = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(today)
        .bind(RentalStatus::Completed)
        .bind(late_fee)
        .bind(total_cost)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_rental_equipment_availability(&mut tx, id, AvailabilityStatus::Available)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Reactivate a completed rental (Completed -> Active).
    ///
    /// Clears the return date, zeroes any late fee that had been charged
    /// (accepted business rule), resets the total to the subtotal, and puts
    /// the equipment back out.
    pub async fn reactivate(&self, id: i32) -> AppResult<Rental> {
        let mut tx = self.pool.begin().await?;

        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rental WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))?;

        if rental.status != RentalStatus::Completed {
            return Err(AppError::InvalidTransition(
                "Only completed rentals can be reactivated".to_string(),
            ));
        }

        Self::lock_rental_equipment(&mut tx, id).await?;

        let updated = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rental
            SET return_date = NULL, status = $2, late_fee = 0, total_cost = subtotal
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(RentalStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_rental_equipment_availability(&mut tx, id, AvailabilityStatus::Rented).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a rental and its line items.
    ///
    /// An unreturned rental (stored status active, overdue or not) must be
    /// returned first. The header and detail deletes share one transaction.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rental WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id {} not found", id)))?;

        if rental.status != RentalStatus::Completed {
            return Err(AppError::InvalidTransition(
                "Active rentals must be returned before deletion".to_string(),
            ));
        }

        sqlx::query("DELETE FROM rental_detail WHERE rental_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM rental WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lock the equipment rows referenced by a rental's line items
    async fn lock_rental_equipment(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        rental_id: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            SELECT eq.id
            FROM equipment eq
            JOIN rental_detail rd ON rd.equipment_id = eq.id
            WHERE rd.rental_id = $1
            FOR UPDATE OF eq
            "#,
        )
        .bind(rental_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(())
    }

    async fn set_rental_equipment_availability(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        rental_id: i32,
        availability: AvailabilityStatus,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE equipment
            SET availability_status = $2
            WHERE id IN (SELECT equipment_id FROM rental_detail WHERE rental_id = $1)
            "#,
        )
        .bind(rental_id)
        .bind(availability)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Replace the stored status with the date-derived one
fn with_effective_status(mut summary: RentalSummary) -> RentalSummary {
    let today = Utc::now().date_naive();
    summary.status = summary
        .status
        .effective(summary.due_date, summary.return_date, today);
    summary
}
