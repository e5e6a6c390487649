//! Loading submissions from the host's search API.
//!
//! The API itself lives outside this crate; hosts implement
//! [`SubmissionSource`] over whatever transport they have. Loading is
//! sequential and completes before the first render.

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::submission::Submission;

/// One request to the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    /// `None` asks for everything in one response.
    pub limit: Option<usize>,
}

/// One response from the search API.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPage {
    pub submissions: Vec<Submission>,
    /// Total number of matching submissions, when the API reports it.
    pub total: Option<usize>,
}

/// A backend that answers submission search requests.
pub trait SubmissionSource {
    /// # Errors
    /// Returns `CalendarError::Fetch` for a non-200 response, or
    /// `CalendarError::Source` when the request could not be made at all.
    fn fetch_page(&mut self, request: PageRequest) -> Result<SubmissionPage>;
}

/// How the widget loads its submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FetchStrategy {
    /// A single request for every submission.
    #[default]
    Single,
    /// Sequential pages of `page_size` until a short or empty page.
    Paginated { page_size: usize },
}

/// Load every submission from `source`.
///
/// # Errors
/// The first failing request aborts the load; nothing partial is returned.
pub fn fetch_all(
    source: &mut dyn SubmissionSource,
    strategy: FetchStrategy,
) -> Result<Vec<Submission>> {
    match strategy {
        FetchStrategy::Single => {
            let page = source.fetch_page(PageRequest {
                offset: 0,
                limit: None,
            })?;
            Ok(page.submissions)
        }
        FetchStrategy::Paginated { page_size } => {
            if page_size == 0 {
                return Err(CalendarError::Source("page size must be positive".to_string()));
            }

            let mut all = Vec::new();
            loop {
                let page = source.fetch_page(PageRequest {
                    offset: all.len(),
                    limit: Some(page_size),
                })?;
                let received = page.submissions.len();
                all.extend(page.submissions);

                let reached_total = page.total.is_some_and(|total| all.len() >= total);
                if received < page_size || reached_total {
                    break;
                }
            }
            tracing::debug!(count = all.len(), page_size, "fetched submissions");
            Ok(all)
        }
    }
}

/// An in-memory source, e.g. a JSON export read from disk.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    submissions: Vec<Submission>,
}

impl StaticSource {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self { submissions }
    }

    /// Parse a JSON array of submissions, or an object holding one under
    /// `"submissions"`.
    ///
    /// # Errors
    /// Returns `CalendarError::Json` if the document has neither shape.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            List(Vec<Submission>),
            Wrapped { submissions: Vec<Submission> },
        }

        let submissions = match serde_json::from_str::<Document>(json)? {
            Document::List(list) => list,
            Document::Wrapped { submissions } => submissions,
        };
        Ok(Self { submissions })
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl SubmissionSource for StaticSource {
    fn fetch_page(&mut self, request: PageRequest) -> Result<SubmissionPage> {
        let start = request.offset.min(self.submissions.len());
        let end = match request.limit {
            Some(limit) => start.saturating_add(limit).min(self.submissions.len()),
            None => self.submissions.len(),
        };
        Ok(SubmissionPage {
            submissions: self.submissions[start..end].to_vec(),
            total: Some(self.submissions.len()),
        })
    }
}
