//! Widget configuration.
//!
//! The widget ships in two deployments: standalone on form 1, and embedded
//! in a CMS template that supplies the form id. They differ in label
//! truncation and in how submissions are fetched.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::label::CMS_LABEL_LIMIT;
use crate::layout::LayoutOptions;
use crate::source::FetchStrategy;

pub const DEFAULT_FORM_ID: u64 = 1;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const CMS_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub form_id: u64,
    pub label_limit: Option<usize>,
    pub fetch: FetchStrategy,
    pub search_debounce_ms: u64,
    /// IANA zone for "today" and for offset-bearing timestamps; UTC if unset.
    pub timezone: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::standalone()
    }
}

impl WidgetConfig {
    pub fn standalone() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID,
            label_limit: None,
            fetch: FetchStrategy::Single,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            timezone: None,
        }
    }

    pub fn cms(form_id: u64) -> Self {
        Self {
            form_id,
            label_limit: Some(CMS_LABEL_LIMIT),
            fetch: FetchStrategy::Paginated {
                page_size: CMS_PAGE_SIZE,
            },
            ..Self::standalone()
        }
    }

    /// # Errors
    /// Returns `CalendarError::InvalidTimezone` if `timezone` is not a valid
    /// IANA identifier.
    pub fn zone(&self) -> Result<Tz> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(chrono_tz::UTC),
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|_| CalendarError::InvalidTimezone(raw.to_string())),
        }
    }

    /// Today's date in the configured zone.
    ///
    /// # Errors
    /// Same as [`WidgetConfig::zone`].
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.zone()?).date_naive())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            label_limit: self.label_limit,
        }
    }

    /// Name of the host event that opens a submission, e.g. `view_1`.
    pub fn view_event_name(&self) -> String {
        format!("view_{}", self.form_id)
    }
}
