//! Calendar event model shared by the expander and the month grid layout.
//!
//! Times are naive local wall-clock values: the widget always renders in the
//! viewer's zone, so every comparison in this crate is done on calendar
//! components rather than on instants.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of the form submission an event came from.
///
/// Occurrences keep the id of their source submission so the two can be
/// correlated (deduplication, "view submission" triggers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repetition pattern selected in the `timeFrame` question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecurrenceRule {
    #[default]
    None,
    DailyEveryday,
    DailyWeekday,
    Weekly,
    BiWeekly,
    Monthly,
    BiMonthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl RecurrenceRule {
    /// Map a raw single-select answer onto a rule.
    ///
    /// Blank or unknown answers are `None`: they never match any date.
    pub fn from_answer(raw: &str) -> Self {
        match raw.trim() {
            "DailyEveryday" => Self::DailyEveryday,
            "DailyWeekday" => Self::DailyWeekday,
            "Weekly" => Self::Weekly,
            "BiWeekly" => Self::BiWeekly,
            "Monthly" => Self::Monthly,
            "BiMonthly" => Self::BiMonthly,
            "Quarterly" => Self::Quarterly,
            "SemiAnnually" => Self::SemiAnnually,
            "Annually" => Self::Annually,
            _ => Self::None,
        }
    }

    /// The answer text as stored on the form (empty for `None`).
    pub fn as_answer(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::DailyEveryday => "DailyEveryday",
            Self::DailyWeekday => "DailyWeekday",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "BiWeekly",
            Self::Monthly => "Monthly",
            Self::BiMonthly => "BiMonthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnually => "SemiAnnually",
            Self::Annually => "Annually",
        }
    }

    pub fn is_recurring(&self) -> bool {
        *self != Self::None
    }
}

/// Upper bound on a recurring event, taken from the `endRecurring` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum RecurrenceEnd {
    /// No end date: the event recurs indefinitely.
    #[default]
    Never,
    /// Recurs on or before this date (inclusive through end of day).
    On(NaiveDate),
    /// An end date was given but could not be read; admits no occurrence.
    Unparseable,
}

impl RecurrenceEnd {
    pub fn admits(&self, date: NaiveDate) -> bool {
        match self {
            Self::Never => true,
            Self::On(last) => date <= *last,
            Self::Unparseable => false,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::On(date) => Some(*date),
            _ => None,
        }
    }
}

/// Whether an event was submitted directly or synthesized by the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Literal,
    Occurrence,
}

/// A single calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: SubmissionId,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub event_type: String,
    pub additional_info: String,
    pub recurrence: RecurrenceRule,
    pub recurrence_end: RecurrenceEnd,
    pub kind: EventKind,
}

impl Event {
    /// A literal, non-recurring event with empty optional fields.
    pub fn new(
        id: SubmissionId,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start,
            end,
            event_type: String::new(),
            additional_info: String::new(),
            recurrence: RecurrenceRule::None,
            recurrence_end: RecurrenceEnd::Never,
            kind: EventKind::Literal,
        }
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule, until: RecurrenceEnd) -> Self {
        self.recurrence = rule;
        self.recurrence_end = until;
        self
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when `date` lies between the start and end dates, inclusive by whole day.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    pub fn is_occurrence(&self) -> bool {
        self.kind == EventKind::Occurrence
    }
}

/// The last representable millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}
