//! Free-text search over events.
//!
//! An event passes when the search text appears, case-insensitively, in its
//! name, its type, or its additional information. Blank search text passes
//! everything.

use crate::event::Event;

/// True when `search` matches `event`.
pub fn matches_search(event: &Event, search: &str) -> bool {
    let needle = search.to_lowercase();
    [&event.name, &event.event_type, &event.additional_info]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the events matching `search`, preserving their order.
pub fn filter_events(events: &[Event], search: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches_search(event, search))
        .cloned()
        .collect()
}
