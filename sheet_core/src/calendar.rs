//! Calendar - Birth dates and age against the fixed epoch
//!
//! The sheet's world clock is frozen at 979-07-15. A character's age is
//! counted at that date and every birth date must come strictly before it.
//!
//! Note the day-15 boundary: a birth on 979-07-15 is rejected by
//! [`BirthDate::precedes_epoch`], but [`age_at_epoch`] only subtracts a year
//! for days *after* the 15th.

use serde::{Deserialize, Serialize};

/// Epoch year
pub const EPOCH_YEAR: i64 = 979;
/// Epoch month
pub const EPOCH_MONTH: i64 = 7;
/// Epoch day
pub const EPOCH_DAY: i64 = 15;

const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A birth date in the sheet calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl BirthDate {
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        BirthDate { year, month, day }
    }

    /// Whether the day exists in the given month and year
    pub fn is_real_date(&self) -> bool {
        let max = days_in_month(self.year, self.month);
        self.day >= 1 && self.day <= max
    }

    /// Whether the date falls strictly before 979-07-15
    pub fn precedes_epoch(&self) -> bool {
        !(self.year > EPOCH_YEAR
            || (self.year == EPOCH_YEAR
                && (self.month > EPOCH_MONTH
                    || (self.month == EPOCH_MONTH && self.day >= EPOCH_DAY))))
    }

    /// Age at the epoch date
    pub fn age(&self) -> i64 {
        age_at_epoch(self)
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` (1-12) of `year`; 0 for months outside the calendar
pub fn days_in_month(year: i64, month: i64) -> i64 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Age as of 979-07-15, never negative
pub fn age_at_epoch(date: &BirthDate) -> i64 {
    let mut age = EPOCH_YEAR.saturating_sub(date.year);
    if date.month > EPOCH_MONTH || (date.month == EPOCH_MONTH && date.day > EPOCH_DAY) {
        age = age.saturating_sub(1);
    }
    age.max(0)
}
