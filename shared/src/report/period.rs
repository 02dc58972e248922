//! Reporting period arithmetic

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A reporting period: one calendar month or a whole year
///
/// Month indices are zero-based (0 = January, 11 = December), matching
/// how record dates are compared via [`chrono::Datelike::month0`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Month { month0: u32, year: i32 },
    Year { year: i32 },
}

/// Errors constructing a reporting period
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month index out of range: {0} (expected 0-11)")]
    InvalidMonth(u32),
}

impl ReportPeriod {
    /// A single-month period. `month0` is zero-based.
    pub fn month(month0: u32, year: i32) -> Result<Self, PeriodError> {
        if month0 > 11 {
            return Err(PeriodError::InvalidMonth(month0));
        }
        Ok(ReportPeriod::Month { month0, year })
    }

    /// A whole-year period.
    pub fn year(year: i32) -> Self {
        ReportPeriod::Year { year }
    }

    /// The immediately preceding month as `(month0, year)`, rolling over
    /// to December of the prior year for January. Whole-year periods have
    /// no previous period.
    pub fn previous(&self) -> Option<(u32, i32)> {
        match *self {
            ReportPeriod::Month { month0: 0, year } => Some((11, year - 1)),
            ReportPeriod::Month { month0, year } => Some((month0 - 1, year)),
            ReportPeriod::Year { .. } => None,
        }
    }

    /// Whether a date falls inside the target period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            ReportPeriod::Month { month0, year } => {
                date.month0() == month0 && date.year() == year
            }
            ReportPeriod::Year { year } => date.year() == year,
        }
    }

    /// Whether a date falls inside the previous period. Always false in
    /// whole-year mode.
    pub fn preceded_by(&self, date: NaiveDate) -> bool {
        match self.previous() {
            Some((month0, year)) => date.month0() == month0 && date.year() == year,
            None => false,
        }
    }
}
