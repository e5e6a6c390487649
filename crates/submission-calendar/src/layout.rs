//! Month grid layout -- places events into day cells of a Sunday-start grid.
//!
//! Multi-day events are drawn as banners that start on their first visible
//! day within a week and stretch across the following cells. Each banner gets
//! a slot (row) index that is reserved on every weekday it spans, so two
//! banners running through the same days never share a row. Days with
//! [`MAX_EVENTS_PER_DAY`] or more events show the first [`MAX_VISIBLE_EVENTS`]
//! and fold the rest into a "+N events" overflow group.
//!
//! Per-week state is keyed the way the widget has always keyed it: banner
//! markers by event *name*, slot reservations by weekday. Both are cleared at
//! the start of every week.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::{Event, SubmissionId};
use crate::label::{banner_label, event_detail, EventDetail};
use crate::window::MonthWindow;

/// A day holding this many events or more gets an overflow group.
pub const MAX_EVENTS_PER_DAY: usize = 5;

/// Events drawn individually on an overflowing day.
pub const MAX_VISIBLE_EVENTS: usize = MAX_EVENTS_PER_DAY - 1;

const DAYS_PER_WEEK: usize = 7;

/// Rendering knobs that differ between widget deployments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOptions {
    /// Cut banner labels to this many characters.
    pub label_limit: Option<usize>,
}

/// A visible event block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub event: Event,
    pub slot: usize,
    /// Width in day cells, at least 1.
    pub span: u32,
    pub label: String,
    pub detail: EventDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum EventBlock {
    Banner(Banner),
    /// Invisible filler holding a row that a banner from an earlier day
    /// stretches across.
    Placeholder { slot: usize, id: SubmissionId },
}

impl EventBlock {
    pub fn slot(&self) -> usize {
        match self {
            Self::Banner(banner) => banner.slot,
            Self::Placeholder { slot, .. } => *slot,
        }
    }
}

/// Events of an overflowing day that did not get their own block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowGroup {
    pub hidden: usize,
    pub events: Vec<Event>,
}

impl OverflowGroup {
    pub fn label(&self) -> String {
        format!("+{} events", self.hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// Column, Sunday = 0.
    pub weekday_index: usize,
    pub is_today: bool,
    pub blocks: Vec<EventBlock>,
    pub overflow: Option<OverflowGroup>,
}

impl DayCell {
    pub fn banners(&self) -> impl Iterator<Item = &Banner> {
        self.blocks.iter().filter_map(|block| match block {
            EventBlock::Banner(banner) => Some(banner),
            EventBlock::Placeholder { .. } => None,
        })
    }
}

/// The laid-out month, ready for a rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub window: MonthWindow,
    pub label: String,
    /// Blank cells before day 1.
    pub leading_padding: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn day(&self, day_of_month: u32) -> Option<&DayCell> {
        self.days.iter().find(|cell| cell.day_of_month == day_of_month)
    }

    /// Day cells grouped into grid rows; the first row is short by the padding.
    pub fn weeks(&self) -> Vec<&[DayCell]> {
        let first_row = (DAYS_PER_WEEK - self.leading_padding as usize).min(self.days.len());
        let (head, rest) = self.days.split_at(first_row);
        let mut rows = vec![head];
        rows.extend(rest.chunks(DAYS_PER_WEEK));
        rows.retain(|row| !row.is_empty());
        rows
    }
}

/// Slot reservations and banner markers for the week being laid out.
#[derive(Default)]
struct WeekState {
    reserved: [BTreeMap<usize, SubmissionId>; DAYS_PER_WEEK],
    drawn: HashSet<String>,
}

impl WeekState {
    /// Emit a placeholder for every reserved slot starting at `cursor` and
    /// return the first free slot.
    fn skip_reserved(
        &self,
        weekday: usize,
        mut cursor: usize,
        blocks: &mut Vec<EventBlock>,
    ) -> usize {
        while let Some(id) = self.reserved[weekday].get(&cursor) {
            blocks.push(EventBlock::Placeholder {
                slot: cursor,
                id: *id,
            });
            cursor += 1;
        }
        cursor
    }

    fn reserve(&mut self, weekday: usize, span: u32, slot: usize, id: SubmissionId) {
        for day in weekday..weekday + span as usize {
            self.reserved[day].insert(slot, id);
        }
    }
}

/// Lay out `events` over `window`.
///
/// `events` is the full list for the month, literal events and occurrences
/// alike. Events on a day are ordered by start time, ties keeping input order.
pub fn layout(
    events: &[Event],
    window: MonthWindow,
    today: NaiveDate,
    options: &LayoutOptions,
) -> MonthGrid {
    let days_in_month = window.days_in_month();
    let mut week = WeekState::default();
    let mut days = Vec::with_capacity(days_in_month as usize);

    for date in window.days() {
        let weekday = date.weekday().num_days_from_sunday() as usize;
        if weekday == 0 {
            week = WeekState::default();
        }

        let mut todays: Vec<&Event> = events.iter().filter(|e| e.covers(date)).collect();
        todays.sort_by_key(|e| e.start);

        let visible_count = if todays.len() >= MAX_EVENTS_PER_DAY {
            MAX_VISIBLE_EVENTS
        } else {
            todays.len()
        };
        let (visible, hidden) = todays.split_at(visible_count);

        // Cells left in the month grid, this one included.
        let remaining_cells = days_in_month - date.day() + 1;

        let mut blocks = Vec::new();
        let mut cursor = 0;

        for event in visible {
            if week.drawn.contains(&event.name) {
                cursor = week.skip_reserved(weekday, cursor, &mut blocks);
                continue;
            }
            week.drawn.insert(event.name.clone());

            let days_left = (event.end_date() - date).num_days().max(0) as u32;
            let span = ((DAYS_PER_WEEK - weekday) as u32)
                .min(days_left + 1)
                .min(remaining_cells);

            cursor = week.skip_reserved(weekday, cursor, &mut blocks);
            let slot = cursor;
            week.reserve(weekday, span, slot, event.id);
            cursor += 1;

            blocks.push(EventBlock::Banner(Banner {
                event: (*event).clone(),
                slot,
                span,
                label: banner_label(event, date, options.label_limit),
                detail: event_detail(event),
            }));
        }

        // A banner ends with its event; the next instance starts a new one.
        for event in &todays {
            if event.end_date() == date {
                week.drawn.remove(&event.name);
            }
        }

        let overflow = (!hidden.is_empty()).then(|| OverflowGroup {
            hidden: hidden.len(),
            events: hidden.iter().map(|e| (*e).clone()).collect(),
        });

        days.push(DayCell {
            date,
            day_of_month: date.day(),
            weekday_index: weekday,
            is_today: date == today,
            blocks,
            overflow,
        });
    }

    tracing::debug!(
        month = %window.label(),
        events = events.len(),
        "laid out month grid"
    );

    MonthGrid {
        window,
        label: window.label(),
        leading_padding: window.leading_padding(),
        days,
    }
}
