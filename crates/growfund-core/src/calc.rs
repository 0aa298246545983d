//! Penalty and repayment arithmetic.
//!
//! A payment against a due month is late iff its date is strictly after
//! the 10th of that month. Penalties accrue linearly at a fixed daily
//! rate on the outstanding base; there is no compounding.

use chrono::NaiveDate;
use growfund_domain::due_month::DueMonth;

/// Default penalty rate per late day, as a fraction (1%).
pub const DAILY_PENALTY_RATE: f64 = 0.01;

/// Tolerance for treating an outstanding balance as settled.
pub const AMOUNT_EPSILON: f64 = 1e-6;

/// Calendar days between the due date and the payment date; zero or
/// negative differences are on time.
pub fn days_late(due: NaiveDate, paid: NaiveDate) -> i64 {
    (paid - due).num_days().max(0)
}

/// Days a deposit payment ran past the due month's cutoff.
pub fn deposit_days_late(due_month: &DueMonth, paid: NaiveDate) -> i64 {
    days_late(due_month.cutoff_date(), paid)
}

/// Whether a payment against `due_month` is late: strictly after the
/// cutoff day, never on it.
pub fn is_late_payment(due_month: &DueMonth, paid: NaiveDate) -> bool {
    paid > due_month.cutoff_date()
}

/// Linear penalty: `rate × base × days_late`, zero when on time.
pub fn penalty_amount(rate: f64, base: f64, days_late: i64) -> f64 {
    if days_late <= 0 || base <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    rate * base * days_late as f64
}

/// Balance left on a borrowing after a payment: the tracked principal
/// minus principal already repaid, minus the current payment. Callers
/// validate that `payment` does not exceed the remaining balance.
pub fn outstanding_after(principal: f64, prior_principal_paid: f64, payment: f64) -> f64 {
    principal - prior_principal_paid - payment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> DueMonth {
        DueMonth { year: 2025, month: 3 }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn late_only_strictly_after_the_tenth() {
        assert!(!is_late_payment(&month(), day(9)));
        assert!(!is_late_payment(&month(), day(10)));
        assert!(is_late_payment(&month(), day(11)));
        assert!(is_late_payment(
            &month(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        ));
    }

    #[test]
    fn early_payments_are_never_late() {
        assert_eq!(deposit_days_late(&month(), day(1)), 0);
        assert_eq!(deposit_days_late(&month(), day(10)), 0);
        assert_eq!(deposit_days_late(&month(), day(14)), 4);
    }

    #[test]
    fn penalty_is_linear_in_days() {
        assert_eq!(penalty_amount(0.01, 500.0, 0), 0.0);
        assert!((penalty_amount(0.01, 500.0, 1) - 5.0).abs() < 1e-9);
        assert!((penalty_amount(0.01, 500.0, 7) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn penalty_never_decreases_with_more_days() {
        let mut previous = 0.0;
        for days in 0..60 {
            let current = penalty_amount(DAILY_PENALTY_RATE, 1200.0, days);
            assert!(current >= previous, "penalty shrank at day {days}");
            previous = current;
        }
    }

    #[test]
    fn outstanding_tracks_cumulative_principal() {
        let after_first = outstanding_after(1000.0, 0.0, 400.0);
        assert!((after_first - 600.0).abs() < 1e-9);
        let after_second = outstanding_after(1000.0, 400.0, 600.0);
        assert!(after_second.abs() < 1e-9);
    }
}
