//! The calendar month a deposit obligation is owed for.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day of the month after which a payment counts as late.
pub const CUTOFF_DAY: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
/// A year-month pair formatted as `MMM-yyyy` (`Jan-2025`).
pub struct DueMonth {
    pub year: i32,
    pub month: u32,
}

impl DueMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DueMonthError> {
        if !(1..=12).contains(&month) {
            return Err(DueMonthError::OutOfRange { year, month });
        }
        Ok(Self { year, month })
    }

    /// Derives the due month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Strict parse of the `MMM-yyyy` pattern. Malformed input is a
    /// distinguishable error, never a silent default.
    pub fn parse(value: &str) -> Result<Self, DueMonthError> {
        // chrono cannot parse a bare month-year, so anchor to day 1.
        let padded = format!("01-{}", value.trim());
        let date = NaiveDate::parse_from_str(&padded, "%d-%b-%Y")
            .map_err(|_| DueMonthError::Malformed(value.trim().to_string()))?;
        Ok(Self::from_date(date))
    }

    /// Lenient parse falling back to `default` when the input does not
    /// match the `MMM-yyyy` pattern.
    pub fn parse_or(value: &str, default: DueMonth) -> Self {
        Self::parse(value).unwrap_or(default)
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month always yields a first day")
    }

    /// The payment cutoff: the 10th of the due month. Payments dated
    /// strictly after this are late.
    pub fn cutoff_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, CUTOFF_DAY)
            .expect("every month has a 10th")
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn label(&self) -> String {
        self.first_day().format("%b-%Y").to_string()
    }
}

impl fmt::Display for DueMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors produced when constructing or parsing [`DueMonth`] values.
pub enum DueMonthError {
    Malformed(String),
    OutOfRange { year: i32, month: u32 },
}

impl fmt::Display for DueMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueMonthError::Malformed(value) => {
                write!(f, "`{}` does not match the MMM-yyyy pattern", value)
            }
            DueMonthError::OutOfRange { year, month } => {
                write!(f, "{}-{} is not a calendar month", year, month)
            }
        }
    }
}

impl std::error::Error for DueMonthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_mmm_yyyy() {
        let month = DueMonth::parse("Jan-2025").expect("valid month");
        assert_eq!(month, DueMonth { year: 2025, month: 1 });
        assert_eq!(month.label(), "Jan-2025");
    }

    #[test]
    fn malformed_input_is_a_distinguishable_error() {
        let err = DueMonth::parse("2025-01").expect_err("not MMM-yyyy");
        assert!(matches!(err, DueMonthError::Malformed(_)));
    }

    #[test]
    fn parse_or_falls_back_to_default() {
        let fallback = DueMonth { year: 2024, month: 6 };
        assert_eq!(DueMonth::parse_or("nonsense", fallback), fallback);
        assert_eq!(
            DueMonth::parse_or("Feb-2024", fallback),
            DueMonth { year: 2024, month: 2 }
        );
    }

    #[test]
    fn cutoff_is_the_tenth() {
        let month = DueMonth { year: 2025, month: 2 };
        assert_eq!(
            month.cutoff_date(),
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
        );
    }

    #[test]
    fn next_rolls_over_december() {
        let december = DueMonth { year: 2024, month: 12 };
        assert_eq!(december.next(), DueMonth { year: 2025, month: 1 });
    }

    #[test]
    fn months_order_chronologically() {
        let earlier = DueMonth { year: 2024, month: 12 };
        let later = DueMonth { year: 2025, month: 1 };
        assert!(earlier < later);
    }
}
