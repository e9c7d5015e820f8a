//! Shared domain enums

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RentalStatus
// ---------------------------------------------------------------------------

/// Rental lifecycle status.
///
/// Only `Active` and `Completed` are ever written to the store; `Overdue` is
/// derived from the due date at read time. The database enum keeps the
/// `overdue` value so legacy rows stay decodable, and such rows are treated
/// as active-and-late everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Overdue,
    Completed,
}

impl RentalStatus {
    /// Whether the rental is still out (not returned)
    pub fn is_open(self) -> bool {
        !matches!(self, RentalStatus::Completed)
    }

    /// Resolve the status to display for a given date.
    ///
    /// An open rental past its due date reads as `Overdue`; everything else
    /// keeps its stored meaning.
    pub fn effective(
        self,
        due_date: NaiveDate,
        return_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> RentalStatus {
        if !self.is_open() {
            return RentalStatus::Completed;
        }
        if return_date.is_none() && due_date < today {
            RentalStatus::Overdue
        } else {
            RentalStatus::Active
        }
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RentalStatus::Active => "Active",
            RentalStatus::Overdue => "Overdue",
            RentalStatus::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// AvailabilityStatus
// ---------------------------------------------------------------------------

/// Whether a piece of equipment can currently be rented out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Rented,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Rented => "Rented",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ConditionStatus
// ---------------------------------------------------------------------------

/// Physical condition of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "condition_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Excellent,
    Good,
    Fair,
    NeedsRepair,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConditionStatus::Excellent => "Excellent",
            ConditionStatus::Good => "Good",
            ConditionStatus::Fair => "Fair",
            ConditionStatus::NeedsRepair => "Needs repair",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RentalListFilter
// ---------------------------------------------------------------------------

/// List-view filter for rentals.
///
/// Each variant maps to one fixed predicate; callers never assemble WHERE
/// clauses from strings. "Active" deliberately includes rows stored as
/// `overdue` by legacy data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RentalListFilter {
    #[default]
    All,
    Active,
    Overdue,
    Completed,
}

impl RentalListFilter {
    /// SQL predicate over the rental alias `r`
    pub fn predicate(self) -> &'static str {
        match self {
            RentalListFilter::All => "TRUE",
            RentalListFilter::Active => "r.status IN ('active', 'overdue')",
            RentalListFilter::Overdue => {
                "r.status <> 'completed' AND r.return_date IS NULL AND r.due_date < CURRENT_DATE"
            }
            RentalListFilter::Completed => "r.status = 'completed'",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn active_rental_before_due_date_stays_active() {
        let status = RentalStatus::Active.effective(date(2026, 3, 10), None, date(2026, 3, 8));
        assert_eq!(status, RentalStatus::Active);
    }

    #[test]
    fn active_rental_on_due_date_is_not_overdue() {
        let status = RentalStatus::Active.effective(date(2026, 3, 10), None, date(2026, 3, 10));
        assert_eq!(status, RentalStatus::Active);
    }

    #[test]
    fn active_rental_past_due_date_reads_overdue() {
        let status = RentalStatus::Active.effective(date(2026, 3, 10), None, date(2026, 3, 11));
        assert_eq!(status, RentalStatus::Overdue);
    }

    #[test]
    fn legacy_overdue_row_resolves_like_active() {
        // A persisted 'overdue' row is re-derived from its dates
        let on_time = RentalStatus::Overdue.effective(date(2026, 3, 10), None, date(2026, 3, 9));
        assert_eq!(on_time, RentalStatus::Active);
        let late = RentalStatus::Overdue.effective(date(2026, 3, 10), None, date(2026, 3, 12));
        assert_eq!(late, RentalStatus::Overdue);
    }

    #[test]
    fn completed_rental_never_reads_overdue() {
        let status = RentalStatus::Completed.effective(
            date(2026, 3, 10),
            Some(date(2026, 3, 20)),
            date(2026, 4, 1),
        );
        assert_eq!(status, RentalStatus::Completed);
    }

    #[test]
    fn filters_map_to_fixed_predicates() {
        assert_eq!(RentalListFilter::All.predicate(), "TRUE");
        assert!(RentalListFilter::Active.predicate().contains("'active'"));
        assert!(RentalListFilter::Overdue.predicate().contains("CURRENT_DATE"));
        assert_eq!(RentalListFilter::Completed.predicate(), "r.status = 'completed'");
    }
}
