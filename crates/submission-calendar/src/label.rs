//! Banner text and the detail shown when a banner is opened.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::event::Event;

/// Label length used by the CMS-embedded widget.
pub const CMS_LABEL_LIMIT: usize = 23;

const ELLIPSIS: &str = "...";

/// Everything the detail popover of a banner shows, preformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub title: String,
    pub starts: String,
    pub ends: String,
    pub event_type: String,
    /// Rule as answered on the form; empty when not recurring.
    pub recurrence: String,
    pub recurs_until: Option<String>,
    pub additional_info: String,
}

/// US-style clock time, e.g. "9:05 AM".
pub fn clock_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Long US-style date, e.g. "Monday, Jan 1, 2024".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %b %-d, %Y").to_string()
}

pub fn event_detail(event: &Event) -> EventDetail {
    EventDetail {
        title: event.name.clone(),
        starts: format!("{}, {}", long_date(event.start_date()), clock_time(event.start)),
        ends: format!("{}, {}", long_date(event.end_date()), clock_time(event.end)),
        event_type: event.event_type.clone(),
        recurrence: event.recurrence.as_answer().to_string(),
        recurs_until: event.recurrence_end.date().map(long_date),
        additional_info: event.additional_info.clone(),
    }
}

/// The text drawn on `event`'s banner in the cell for `day`.
///
/// On the event's own start date the start time is prefixed; elsewhere the
/// name stands alone. With a `limit`, longer labels are cut to `limit`
/// characters followed by `...`.
pub fn banner_label(event: &Event, day: NaiveDate, limit: Option<usize>) -> String {
    let label = if event.start_date() == day {
        format!("{} {}", clock_time(event.start), event.name)
    } else {
        event.name.clone()
    };

    match limit {
        Some(limit) => truncate(&label, limit),
        None => label,
    }
}

/// Cut `text` to at most `limit` characters, marking the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str(ELLIPSIS);
    cut
}
