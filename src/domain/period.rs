//! Calendar month windows used by overview statistics.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::core::time::Clock;
use crate::domain::common::at_midnight;
use crate::errors::{LedgerError, Result};

/// Years accepted from query-string input; anything else falls back to now.
pub const QUERY_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// A calendar month, spanning its first second through its last second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    month: u32,
    year: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(LedgerError::InvalidYear(year))?;
        let following = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(LedgerError::InvalidYear(year))?;

        Ok(Self {
            month,
            year,
            start: at_midnight(first),
            end: at_midnight(following) - Duration::seconds(1),
        })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.month(), date.year())
    }

    /// The month containing the clock's current date.
    pub fn current(clock: &dyn Clock) -> Result<Self> {
        Self::containing(clock.today())
    }

    /// Builds a period from loosely-typed query values.
    ///
    /// A month is kept only if it parses into `1..=12` and a year only if it
    /// parses into [`QUERY_YEAR_RANGE`]; otherwise the current month or year
    /// is used in its place.
    pub fn from_query(month: Option<&str>, year: Option<&str>, clock: &dyn Clock) -> Result<Self> {
        let today = clock.today();
        let month = month
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| (1..=12).contains(value))
            .unwrap_or_else(|| today.month());
        let year = year
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|value| QUERY_YEAR_RANGE.contains(value))
            .unwrap_or_else(|| today.year());
        Self::new(month, year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Midnight on the first day of the month.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// One second before the next month begins.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}
