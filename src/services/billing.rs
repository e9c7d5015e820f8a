//! Billing calculator.
//!
//! Pure date/amount arithmetic for the rental ledger; no I/O and no failure
//! modes. All amounts are 2-decimal currency values.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Late fee charged when a rental comes back past its due date.
///
/// Returns 10% of the subtotal, rounded half-up to 2 decimal places, when
/// `check_date` is strictly after `due_date`; otherwise 0.00. `check_date`
/// is the actual return date when finalizing a return, or today when
/// deriving the display state of an unreturned rental. Assumes a
/// non-negative subtotal.
pub fn late_fee(subtotal: Decimal, due_date: NaiveDate, check_date: NaiveDate) -> Decimal {
    if check_date > due_date {
        // 10% surcharge, half-up at 2 decimal places
        (subtotal * Decimal::new(10, 2))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    }
}

/// Line total for one rental line item: rate/day times days rented
pub fn line_total(daily_rate: Decimal, days_rented: i32) -> Decimal {
    daily_rate * Decimal::from(days_rented)
}

/// Total cost of a rental: subtotal plus late fee
pub fn total_cost(subtotal: Decimal, late_fee: Decimal) -> Decimal {
    subtotal + late_fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_fee_when_returned_before_due_date() {
        let fee = late_fee(dec!(60.00), date(2026, 3, 10), date(2026, 3, 8));
        assert_eq!(fee, Decimal::ZERO);
    }

    #[test]
    fn no_fee_when_returned_on_due_date() {
        let fee = late_fee(dec!(60.00), date(2026, 3, 10), date(2026, 3, 10));
        assert_eq!(fee, Decimal::ZERO);
    }

    #[test]
    fn ten_percent_fee_when_returned_late() {
        // Reference case: 20.00/day for 3 days, returned 2 days late
        let subtotal = line_total(dec!(20.00), 3);
        assert_eq!(subtotal, dec!(60.00));

        let fee = late_fee(subtotal, date(2026, 3, 10), date(2026, 3, 12));
        assert_eq!(fee, dec!(6.00));
        assert_eq!(total_cost(subtotal, fee), dec!(66.00));
    }

    #[test]
    fn fee_is_flat_regardless_of_how_late() {
        let one_day = late_fee(dec!(100.00), date(2026, 3, 10), date(2026, 3, 11));
        let one_year = late_fee(dec!(100.00), date(2026, 3, 10), date(2027, 3, 10));
        assert_eq!(one_day, dec!(10.00));
        assert_eq!(one_year, dec!(10.00));
    }

    #[test]
    fn fee_rounds_half_up_to_two_decimals() {
        // 10% of 0.45 = 0.045, midpoint rounds away from zero
        let fee = late_fee(dec!(0.45), date(2026, 3, 10), date(2026, 3, 11));
        assert_eq!(fee, dec!(0.05));

        // 10% of 123.44 = 12.344, rounds down
        let fee = late_fee(dec!(123.44), date(2026, 3, 10), date(2026, 3, 11));
        assert_eq!(fee, dec!(12.34));

        // 10% of 123.46 = 12.346, rounds up
        let fee = late_fee(dec!(123.46), date(2026, 3, 10), date(2026, 3, 11));
        assert_eq!(fee, dec!(12.35));
    }

    #[test]
    fn zero_subtotal_yields_zero_fee() {
        let fee = late_fee(Decimal::ZERO, date(2026, 3, 10), date(2026, 4, 1));
        assert_eq!(fee, dec!(0.00));
    }

    #[test]
    fn line_total_scales_with_days() {
        assert_eq!(line_total(dec!(15.50), 1), dec!(15.50));
        assert_eq!(line_total(dec!(15.50), 4), dec!(62.00));
    }
}
