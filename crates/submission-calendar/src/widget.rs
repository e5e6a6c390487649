//! The calendar widget as an explicit component instance.
//!
//! A widget owns everything a render needs: the loaded events (or the fact
//! that loading failed), the month offset, the search text and the search
//! debouncer. Creating one loads the data; dropping it is the teardown.
//! Each render is a pure function of that state and "today".

use std::time::Instant;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::WidgetConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::event::{Event, SubmissionId};
use crate::expander::with_occurrences;
use crate::filter::filter_events;
use crate::layout::{layout, MonthGrid};
use crate::source::{fetch_all, SubmissionSource};
use crate::submission::events_from_submissions;
use crate::window::MonthWindow;

/// Shown in place of the grid when submissions could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data...";

#[derive(Debug, Clone)]
enum CalendarData {
    Loaded(Vec<Event>),
    Failed,
}

/// What the rendering sink should draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Grid(MonthGrid),
    Error { message: String },
}

/// Payload of the host event that opens a submission's full details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSubmission {
    pub event_name: String,
    pub form_id: u64,
    pub submission_id: SubmissionId,
}

impl ViewSubmission {
    pub fn new(config: &WidgetConfig, submission_id: SubmissionId) -> Self {
        Self {
            event_name: config.view_event_name(),
            form_id: config.form_id,
            submission_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarWidget {
    config: WidgetConfig,
    zone: Tz,
    data: CalendarData,
    month_offset: i32,
    search_text: String,
    search_debounce: Debouncer,
}

impl CalendarWidget {
    /// Load submissions from `source` and build a widget on the current month.
    ///
    /// A failed load is not an error here: the widget mounts in a failed state
    /// and renders [`LOAD_ERROR_MESSAGE`]. There is no retry.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTimezone` if the configured zone is invalid.
    pub fn mount(config: WidgetConfig, source: &mut dyn SubmissionSource) -> Result<Self> {
        let zone = config.zone()?;
        let data = match fetch_all(source, config.fetch) {
            Ok(submissions) => {
                let events = events_from_submissions(&submissions, zone);
                tracing::debug!(
                    submissions = submissions.len(),
                    events = events.len(),
                    "calendar data loaded"
                );
                CalendarData::Loaded(events)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    form_id = config.form_id,
                    "failed to load calendar data"
                );
                CalendarData::Failed
            }
        };
        Ok(Self::with_data(config, zone, data))
    }

    /// Build a widget over events that are already in memory.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTimezone` if the configured zone is invalid.
    pub fn from_events(config: WidgetConfig, events: Vec<Event>) -> Result<Self> {
        let zone = config.zone()?;
        Ok(Self::with_data(config, zone, CalendarData::Loaded(events)))
    }

    fn with_data(config: WidgetConfig, zone: Tz, data: CalendarData) -> Self {
        let search_debounce = Debouncer::new(config.search_debounce());
        Self {
            config,
            zone,
            data,
            month_offset: 0,
            search_text: String::new(),
            search_debounce,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.data, CalendarData::Loaded(_))
    }

    /// The loaded literal events; empty after a failed load.
    pub fn events(&self) -> &[Event] {
        match &self.data {
            CalendarData::Loaded(events) => events,
            CalendarData::Failed => &[],
        }
    }

    pub fn month_offset(&self) -> i32 {
        self.month_offset
    }

    pub fn set_month_offset(&mut self, offset: i32) {
        self.month_offset = offset;
    }

    pub fn next_month(&mut self) {
        self.month_offset = self.month_offset.saturating_add(1);
    }

    pub fn prev_month(&mut self) {
        self.month_offset = self.month_offset.saturating_sub(1);
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Record new search text; the re-render is due one debounce period after
    /// the last call (see [`CalendarWidget::poll`]).
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        self.search_text = text.into();
        self.search_debounce.trigger(now);
    }

    /// Replace the search text without waiting; drops any pending re-render.
    pub fn apply_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.search_debounce.cancel();
    }

    /// When a debounced re-render is waiting, the instant it becomes due.
    pub fn pending_render(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    /// Render if a debounced search is due at `now`.
    pub fn poll(&mut self, now: Instant, today: NaiveDate) -> Option<RenderOutcome> {
        self.search_debounce
            .fire_if_due(now)
            .then(|| self.render(today))
    }

    pub fn window(&self, today: NaiveDate) -> MonthWindow {
        MonthWindow::from_offset(today, self.month_offset)
    }

    /// Lay out the displayed month: search filter, recurrence expansion, grid.
    pub fn render(&self, today: NaiveDate) -> RenderOutcome {
        let events = match &self.data {
            CalendarData::Loaded(events) => events,
            CalendarData::Failed => {
                return RenderOutcome::Error {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                }
            }
        };

        let window = self.window(today);
        let matching = filter_events(events, &self.search_text);
        let month_events = with_occurrences(&matching, window);

        RenderOutcome::Grid(layout(
            &month_events,
            window,
            today,
            &self.config.layout_options(),
        ))
    }

    /// Render with "today" taken from the clock in the configured zone.
    pub fn render_now(&self) -> RenderOutcome {
        let today = chrono::Utc::now().with_timezone(&self.zone).date_naive();
        self.render(today)
    }

    pub fn view_submission(&self, submission_id: SubmissionId) -> ViewSubmission {
        ViewSubmission::new(&self.config, submission_id)
    }
}
