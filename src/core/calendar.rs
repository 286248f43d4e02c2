//! Simulation calendar
//!
//! A game calendar, not a civil one: every month has 30 days and every year
//! 12 months. The only nod to the real calendar is the February 29 guard
//! applied when skipping whole years.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DAYS_PER_MONTH: u32 = 30;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const DAYS_PER_YEAR: u32 = DAYS_PER_MONTH * MONTHS_PER_YEAR;

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// A point on the simulation calendar
///
/// Field order gives chronological ordering for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SimDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MONTHS_PER_YEAR).contains(&self.month) && (1..=DAYS_PER_MONTH).contains(&self.day)
    }

    /// Days since day 1 of month 1 of year 0
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * DAYS_PER_YEAR as i64
            + (self.month as i64 - 1) * DAYS_PER_MONTH as i64
            + (self.day as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        let year = ordinal.div_euclid(DAYS_PER_YEAR as i64);
        let in_year = ordinal.rem_euclid(DAYS_PER_YEAR as i64);
        Self {
            year: year as i32,
            month: (in_year / DAYS_PER_MONTH as i64) as u32 + 1,
            day: (in_year % DAYS_PER_MONTH as i64) as u32 + 1,
        }
    }

    pub fn days_until(&self, later: &SimDate) -> i64 {
        later.ordinal() - self.ordinal()
    }

    pub fn plus_days(&self, days: i64) -> Self {
        Self::from_ordinal(self.ordinal() + days)
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Day/month/year counter driven by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    date: SimDate,
}

impl SimulationClock {
    pub fn new(start_year: i32) -> Self {
        Self {
            date: SimDate::new(start_year, 1, 1),
        }
    }

    pub fn at(date: SimDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> SimDate {
        self.date
    }

    pub fn day(&self) -> u32 {
        self.date.day
    }

    pub fn month(&self) -> u32 {
        self.date.month
    }

    pub fn year(&self) -> i32 {
        self.date.year
    }

    /// Move forward one day, rolling day 30 into the next month and
    /// month 12 into the next year
    pub fn advance_day(&mut self) -> SimDate {
        self.date.day += 1;
        if self.date.day > DAYS_PER_MONTH {
            self.date.day = 1;
            self.date.month += 1;
            if self.date.month > MONTHS_PER_YEAR {
                self.date.month = 1;
                self.date.year += 1;
            }
        }
        self.date
    }

    /// Move forward one year. February 29 becomes February 28 when the
    /// new year is not a leap year.
    pub fn advance_year(&mut self) -> SimDate {
        self.date.year += 1;
        if self.date.month == 2 && self.date.day == 29 && !is_leap_year(self.date.year) {
            self.date.day = 28;
        }
        self.date
    }
}
