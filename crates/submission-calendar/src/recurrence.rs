//! Recurrence rule evaluation.
//!
//! Every rule is anchored on the source event's start date and compares
//! calendar components (weekday, day of month, month index). Only the weekly
//! rules measure distance, in whole days.
//!
//! The month-stepping rules use the absolute difference of the two month
//! indices and ignore the year.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::event::{Event, RecurrenceRule};

/// Does `event`'s rule select `date`?
///
/// This looks at the rule only; the eligibility window (after the literal end,
/// not past the recurrence end) is the expander's concern.
pub fn occurs(event: &Event, date: NaiveDate) -> bool {
    rule_selects(event.recurrence, event.start_date(), date)
}

/// Rule semantics against an explicit anchor date.
pub fn rule_selects(rule: RecurrenceRule, anchor: NaiveDate, date: NaiveDate) -> bool {
    let same_weekday = anchor.weekday() == date.weekday();
    let same_nth_weekday = same_weekday && week_of_month(anchor) == week_of_month(date);
    let days_apart = (date - anchor).num_days();

    match rule {
        RecurrenceRule::None => false,
        RecurrenceRule::DailyEveryday => true,
        RecurrenceRule::DailyWeekday => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        RecurrenceRule::Weekly => same_weekday && days_apart % 7 == 0,
        RecurrenceRule::BiWeekly => same_weekday && days_apart % 14 == 0,
        RecurrenceRule::Monthly => same_nth_weekday,
        RecurrenceRule::BiMonthly => same_nth_weekday && month_gap(anchor, date) % 2 == 0,
        RecurrenceRule::Quarterly => same_nth_weekday && month_gap(anchor, date) % 3 == 0,
        RecurrenceRule::SemiAnnually => same_nth_weekday && month_gap(anchor, date) % 6 == 0,
        RecurrenceRule::Annually => same_nth_weekday && anchor.month() == date.month(),
    }
}

/// `floor(day_of_month / 7)`: 0 for days 1-6, 1 for 7-13, and so on.
fn week_of_month(date: NaiveDate) -> u32 {
    date.day() / 7
}

/// Distance between the month indices of two dates, year ignored.
fn month_gap(a: NaiveDate, b: NaiveDate) -> u32 {
    a.month0().abs_diff(b.month0())
}
