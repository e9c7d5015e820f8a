//! Dashboard statistics service

use rust_decimal::Decimal;

use crate::{
    api::stats::{DashboardResponse, EquipmentUsage, OverdueRental, RecentRental},
    error::AppResult,
    repository::Repository,
    services::billing,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assemble the dashboard metrics.
    ///
    /// Overdue counts and the overdue listing use the derived predicate
    /// (unreturned and past due), never the stored status value.
    pub async fn get_dashboard(&self) -> AppResult<DashboardResponse> {
        let pool = &self.repository.pool;

        let total_revenue: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_cost), 0) FROM rental")
                .fetch_one(pool)
                .await?;

        let total_late_fees: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(late_fee), 0) FROM rental WHERE late_fee > 0")
                .fetch_one(pool)
                .await?;

        let active_rentals: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM rental
            WHERE status <> 'completed' AND return_date IS NULL AND due_date >= CURRENT_DATE
            "#,
        )
        .fetch_one(pool)
        .await?;

        let overdue_rentals: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM rental
            WHERE status <> 'completed' AND return_date IS NULL AND due_date < CURRENT_DATE
            "#,
        )
        .fetch_one(pool)
        .await?;

        let completed_rentals: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rental WHERE status = 'completed'")
                .fetch_one(pool)
                .await?;

        let most_rented_equipment = sqlx::query_as::<_, EquipmentUsage>(
            r#"
            SELECT
                e.name,
                e.equipment_type,
                COUNT(rd.id) AS rental_count,
                COALESCE(SUM(rd.line_total), 0) AS total_revenue
            FROM equipment e
            JOIN rental_detail rd ON rd.equipment_id = e.id
            GROUP BY e.id, e.name, e.equipment_type
            ORDER BY rental_count DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await?;

        let today = chrono::Utc::now().date_naive();
        let overdue = sqlx::query_as::<_, OverdueRental>(
            r#"
            SELECT
                r.id, r.rental_date, r.due_date, r.subtotal, r.late_fee, r.total_cost,
                (CURRENT_DATE - r.due_date) AS days_overdue,
                c.first_name AS customer_first_name,
                c.last_name AS customer_last_name,
                c.phone AS customer_phone,
                c.email AS customer_email,
                COALESCE(STRING_AGG(e.name, ', ' ORDER BY e.name), '') AS equipment_list
            FROM rental r
            JOIN customer c ON c.id = r.customer_id
            JOIN rental_detail rd ON rd.rental_id = r.id
            JOIN equipment e ON e.id = rd.equipment_id
            WHERE r.status <> 'completed' AND r.return_date IS NULL AND r.due_date < CURRENT_DATE
            GROUP BY r.id, c.id
            ORDER BY r.due_date ASC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|mut r: OverdueRental| {
            r.projected_late_fee = billing::late_fee(r.subtotal, r.due_date, today);
            r
        })
        .collect::<Vec<_>>();

        let recent_rentals = sqlx::query_as::<_, RecentRental>(
            r#"
            SELECT
                r.id, r.rental_date, r.due_date,
                CASE
                    WHEN r.status = 'completed' THEN 'completed'
                    WHEN r.return_date IS NULL AND r.due_date < CURRENT_DATE THEN 'overdue'
                    ELSE 'active'
                END::rental_status AS status,
                r.total_cost,
                c.first_name AS customer_first_name,
                c.last_name AS customer_last_name,
                e.first_name AS employee_first_name,
                e.last_name AS employee_last_name
            FROM rental r
            JOIN customer c ON c.id = r.customer_id
            JOIN employee e ON e.id = r.employee_id
            ORDER BY r.rental_date DESC, r.id DESC
            LIMIT 10
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(DashboardResponse {
            total_revenue,
            total_late_fees,
            active_rentals,
            overdue_rentals,
            completed_rentals,
            most_rented_equipment,
            overdue,
            recent_rentals,
        })
    }
}
