//! Recurrence expansion -- synthesizes the occurrences of recurring events
//! that fall inside a displayed month.
//!
//! Each day of the month is visited in order, and for each day every recurring
//! literal event in input order. An occurrence is produced when:
//!
//! 1. the day is strictly after the source's literal end date,
//! 2. the day is admitted by the source's recurrence end (inclusive),
//! 3. the source's rule selects the day (see [`crate::recurrence`]),
//! 4. no literal event or earlier occurrence with the same id still runs
//!    (by end-of-day of its end date) at the candidate's start.

use chrono::{Duration, NaiveDate};

use crate::event::{end_of_day, Event, EventKind};
use crate::recurrence::occurs;
use crate::window::MonthWindow;

/// Expand the recurring events in `events` over `window`.
///
/// Returns only the synthesized occurrences, ordered by date and then by the
/// input order of their sources. Events without a rule, and events that are
/// themselves occurrences, produce nothing.
pub fn expand(events: &[Event], window: MonthWindow) -> Vec<Event> {
    let mut occurrences: Vec<Event> = Vec::new();

    for date in window.days() {
        let sources = events
            .iter()
            .filter(|e| e.kind == EventKind::Literal && e.recurrence.is_recurring());

        for source in sources {
            if !is_eligible(source, date) || !occurs(source, date) {
                continue;
            }

            let candidate = occurrence_on(source, date);

            // A literal instance or an earlier occurrence already covers this date.
            if is_covered(events, &candidate) || is_covered(&occurrences, &candidate) {
                continue;
            }

            occurrences.push(candidate);
        }
    }

    tracing::debug!(
        month = %window.label(),
        sources = events.len(),
        occurrences = occurrences.len(),
        "expanded recurring events"
    );

    occurrences
}

/// The literal events followed by their occurrences in `window`.
pub fn with_occurrences(events: &[Event], window: MonthWindow) -> Vec<Event> {
    let mut all = events.to_vec();
    all.extend(expand(events, window));
    all
}

/// Synthesize the occurrence of `source` on `date`.
///
/// The start keeps its time of day and moves by the whole-day distance from
/// the source's start date; the end keeps the source's duration.
pub fn occurrence_on(source: &Event, date: NaiveDate) -> Event {
    let shift = Duration::days((date - source.start_date()).num_days());
    let start = source.start + shift;

    Event {
        start,
        end: start + source.duration(),
        kind: EventKind::Occurrence,
        ..source.clone()
    }
}

fn is_eligible(source: &Event, date: NaiveDate) -> bool {
    date > source.end_date() && source.recurrence_end.admits(date)
}

fn is_covered(existing: &[Event], candidate: &Event) -> bool {
    existing
        .iter()
        .any(|e| e.id == candidate.id && end_of_day(e.end_date()) > candidate.start)
}
