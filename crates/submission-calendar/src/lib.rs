//! # submission-calendar
//!
//! Month-view calendar engine for events collected through a form builder.
//!
//! Each form submission is one event (name, start/end, type, notes, and an
//! optional recurrence rule). The engine filters submissions by free-text
//! search, expands recurrence rules into concrete occurrences for the
//! displayed month, and lays the result out as a Sunday-start grid of day
//! cells with spanning banners and "+N events" overflow groups. The output is
//! a typed view-model; turning it into markup is left to the host.
//!
//! ## Modules
//!
//! - [`event`] — `Event`, `RecurrenceRule`, `RecurrenceEnd`
//! - [`submission`] — raw submission records → literal events
//! - [`filter`] — case-insensitive search over name/type/notes
//! - [`window`] — the displayed month and offset navigation
//! - [`recurrence`] — does a rule select a given date?
//! - [`expander`] — synthesize a month's occurrences, with deduplication
//! - [`layout`] — day cells, banner slots, overflow groups
//! - [`label`] — banner text and truncation
//! - [`source`] — loading submissions (single or paginated)
//! - [`debounce`] — trailing-edge debounce for search input
//! - [`config`] — per-deployment widget settings
//! - [`widget`] — the component instance tying it all together
//! - [`error`] — Error types

pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod expander;
pub mod filter;
pub mod label;
pub mod layout;
pub mod recurrence;
pub mod source;
pub mod submission;
pub mod widget;
pub mod window;

pub use config::WidgetConfig;
pub use error::CalendarError;
pub use event::{Event, EventKind, RecurrenceEnd, RecurrenceRule, SubmissionId};
pub use expander::{expand, with_occurrences};
pub use filter::filter_events;
pub use layout::{layout, DayCell, EventBlock, LayoutOptions, MonthGrid, OverflowGroup};
pub use recurrence::occurs;
pub use source::{fetch_all, FetchStrategy, StaticSource, SubmissionSource};
pub use submission::Submission;
pub use widget::{CalendarWidget, RenderOutcome, ViewSubmission};
pub use window::MonthWindow;
