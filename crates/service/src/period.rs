//! Calendar windows used by the meal views.
//!
//! Dates are `NaiveDate` in UTC; ranges are inclusive on both ends.

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use serde::Serialize;

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the UTC calendar date from the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate { self.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(day: NaiveDate) -> Self { Self { start: day, end: day } }

    pub fn contains(&self, day: NaiveDate) -> bool { self.start <= day && day <= self.end }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    /// Trailing window: seven days before today through today.
    Week,
    /// First through last day of today's calendar month.
    Month,
}

impl Period {
    pub fn range(self, today: NaiveDate) -> DateRange {
        match self {
            Period::Today => DateRange::single(today),
            Period::Week => DateRange {
                start: today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN),
                end: today,
            },
            Period::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                DateRange { start: first, end: last }
            }
        }
    }
}
