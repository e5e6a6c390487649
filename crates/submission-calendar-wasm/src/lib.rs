//! WASM bindings for submission-calendar.
//!
//! Exposes month rendering, recurring-occurrence expansion and the
//! view-submission trigger to JavaScript via `wasm-bindgen`. All complex types
//! are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p submission-calendar-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/submission_calendar_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use submission_calendar::event::Event;
use submission_calendar::{
    expand, filter_events, CalendarWidget, MonthWindow, StaticSource, SubmissionId, ViewSubmission,
    WidgetConfig,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct OccurrenceDto {
    submission_id: u64,
    name: String,
    start: String,
    end: String,
}

impl From<&Event> for OccurrenceDto {
    fn from(e: &Event) -> Self {
        Self {
            submission_id: e.id.0,
            name: e.name.clone(),
            start: e.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end: e.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Parse an optional widget configuration; absent or blank means standalone.
fn parse_config(config_json: Option<String>) -> Result<WidgetConfig, JsValue> {
    match config_json.as_deref().map(str::trim) {
        None | Some("") => Ok(WidgetConfig::standalone()),
        Some(json) => {
            serde_json::from_str(json).map_err(|e| js_error("Invalid config JSON", e))
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| js_error(&format!("Invalid date '{}'", s), e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

fn mount(submissions_json: &str, config: WidgetConfig) -> Result<CalendarWidget, JsValue> {
    let mut source = StaticSource::from_json(submissions_json)
        .map_err(|e| js_error("Invalid submissions JSON", e))?;
    CalendarWidget::mount(config, &mut source).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out one month of submissions.
///
/// Returns the JSON view-model: `{"status": "grid", ...}` with day cells,
/// banners and overflow groups, or `{"status": "error", "message": ...}` when
/// the submissions could not be loaded.
///
/// # Arguments
/// - `submissions_json` -- array of submission records, or `{"submissions": [...]}`
/// - `config_json` -- optional widget configuration (standalone if omitted)
/// - `today` -- the current date as `YYYY-MM-DD`
/// - `month_offset` -- months away from the month of `today`
/// - `search` -- optional free-text filter
#[wasm_bindgen(js_name = "renderMonth")]
pub fn render_month(
    submissions_json: &str,
    config_json: Option<String>,
    today: &str,
    month_offset: i32,
    search: Option<String>,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let today = parse_date(today)?;
    let mut widget = mount(submissions_json, config)?;

    widget.set_month_offset(month_offset);
    if let Some(search) = search {
        widget.apply_search(search);
    }
    let outcome = widget.render(today);
    to_json(&outcome)
}

/// Synthesize the recurring occurrences of a calendar month.
///
/// Returns a JSON array of `{submission_id, name, start, end}` objects with
/// local datetime strings, ordered by day.
#[wasm_bindgen(js_name = "expandMonth")]
pub fn expand_month(
    submissions_json: &str,
    year: i32,
    month: u32,
    config_json: Option<String>,
    search: Option<String>,
) -> Result<String, JsValue> {
    let window = MonthWindow::new(year, month)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid month: {}-{}", year, month)))?;
    let widget = mount(submissions_json, parse_config(config_json)?)?;
    if !widget.is_loaded() {
        return Err(JsValue::from_str(submission_calendar::widget::LOAD_ERROR_MESSAGE));
    }

    let matching = filter_events(widget.events(), search.as_deref().unwrap_or(""));
    let dtos: Vec<OccurrenceDto> = expand(&matching, window)
        .iter()
        .map(OccurrenceDto::from)
        .collect();
    to_json(&dtos)
}

/// The host event to raise when a banner is clicked.
///
/// Returns `{"event_name": "view_<form_id>", "form_id": ..., "submission_id": ...}`.
#[wasm_bindgen(js_name = "viewSubmission")]
pub fn view_submission(config_json: Option<String>, submission_id: u64) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    to_json(&ViewSubmission::new(&config, SubmissionId(submission_id)))
}
