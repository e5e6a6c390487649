//! The displayed month and its calendar arithmetic.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
}

impl MonthWindow {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `offset` months away from the one containing `today`.
    ///
    /// Offsets roll over year boundaries in both directions. An offset that
    /// leaves chrono's date range keeps the current month.
    pub fn from_offset(today: NaiveDate, offset: i32) -> Self {
        let first = Self::containing(today).first_day();
        let shifted = if offset >= 0 {
            first.checked_add_months(Months::new(offset.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(offset.unsigned_abs()))
        };
        Self::containing(shifted.unwrap_or(first))
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map(|next| next - Duration::days(1))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Every date of the month, day 1 through the last day inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
    }

    /// Number of blank cells before day 1 in a Sunday-start grid.
    pub fn leading_padding(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// Header text, e.g. "January 2024".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}
