//! Equipment repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentSummary, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with aggregated rental history.
    ///
    /// `available_only` restricts to units that can be put on a new rental
    /// (the selection list of the create-rental workflow).
    pub async fn list(
        &self,
        include_archived: bool,
        available_only: bool,
    ) -> AppResult<Vec<EquipmentSummary>> {
        let rows = sqlx::query_as::<_, EquipmentSummary>(
            r#"
            SELECT
                e.id, e.name, e.equipment_type, e.daily_rate,
                e.availability_status, e.condition_status, e.is_archived,
                COUNT(rd.id) AS times_rented,
                COALESCE(SUM(rd.line_total), 0) AS total_revenue
            FROM equipment e
            LEFT JOIN rental_detail rd ON rd.equipment_id = e.id
            WHERE ($1 OR e.is_archived = FALSE)
              AND (NOT $2 OR e.availability_status = 'available')
            GROUP BY e.id
            ORDER BY e.equipment_type, e.name
            "#,
        )
        .bind(include_archived)
        .bind(available_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// Create equipment (new units start Available)
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, equipment_type, description, daily_rate, condition_status)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'good'))
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.equipment_type)
        .bind(&data.description)
        .bind(data.daily_rate)
        .bind(data.condition_status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment (partial; absent fields keep their value).
    ///
    /// Rate changes do not touch existing rental line items, which carry
    /// their own snapshot of the rate.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = COALESCE($2, name),
                equipment_type = COALESCE($3, equipment_type),
                description = COALESCE($4, description),
                daily_rate = COALESCE($5, daily_rate),
                condition_status = COALESCE($6, condition_status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.equipment_type)
        .bind(&data.description)
        .bind(data.daily_rate)
        .bind(data.condition_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// Archive equipment.
    ///
    /// Rejected while the unit sits on any unreturned rental; the guard and
    /// the flag update share one transaction with the row locked.
    pub async fn archive(&self, id: i32) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))?;

        let on_open_rental: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM rental_detail rd
                JOIN rental r ON r.id = rd.rental_id
                WHERE rd.equipment_id = $1
                  AND r.status IN ('active', 'overdue')
            )
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if on_open_rental {
            return Err(AppError::InvalidTransition(
                "Equipment is on an active rental and cannot be archived".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET is_archived = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Unarchive equipment
    pub async fn unarchive(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET is_archived = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// Delete equipment.
    ///
    /// Only archived units that were never rented can be deleted; any
    /// rental_detail row, even from a completed rental, blocks deletion to
    /// preserve history.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))?;

        if !equipment.is_archived {
            return Err(AppError::InvalidTransition(
                "Equipment must be archived before deletion".to_string(),
            ));
        }

        let detail_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rental_detail WHERE equipment_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if detail_count > 0 {
            return Err(AppError::InvalidTransition(format!(
                "Equipment appears in {} rental line item(s) and cannot be deleted",
                detail_count
            )));
        }

        sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
