//! Raw form submissions and their conversion into calendar events.
//!
//! A submission is a set of answers keyed by question key. The search API
//! returns them as `{"submissionId": 7, "answers": [{"questionKey": ..., "value": ...}]}`;
//! exports that were already flattened (`{"submissionId": 7, "eventName": ...}`)
//! are accepted too. Single-select answers arrive as `{"selections": ["..."]}`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CalendarError, Result};
use crate::event::{Event, EventKind, RecurrenceEnd, RecurrenceRule, SubmissionId};

pub const EVENT_NAME: &str = "eventName";
pub const START_DATE_TIME: &str = "startDateTime";
pub const END_DATE_TIME: &str = "endDateTime";
pub const EVENT_TYPE: &str = "eventType";
pub const ADDITIONAL_INFORMATION: &str = "additionalInformation";
pub const TIME_FRAME: &str = "timeFrame";
pub const END_RECURRING: &str = "endRecurring";

const SUBMISSION_ID: &str = "submissionId";

/// Accepted layouts for naive (zone-less) timestamps, most specific first.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One question/answer pair as returned by the search API.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEntry {
    #[serde(rename = "questionKey")]
    pub question_key: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubmission {
    Answers {
        #[serde(rename = "submissionId", deserialize_with = "deserialize_submission_id")]
        submission_id: SubmissionId,
        answers: Vec<AnswerEntry>,
    },
    Flat(serde_json::Map<String, Value>),
}

/// Ids arrive as JSON numbers or as numeric strings.
fn submission_id_from_value(id: &Value) -> Option<SubmissionId> {
    match id {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .map(SubmissionId)
}

fn deserialize_submission_id<'de, D>(
    deserializer: D,
) -> std::result::Result<SubmissionId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Value::deserialize(deserializer)?;
    submission_id_from_value(&id)
        .ok_or_else(|| de::Error::custom(format!("invalid submission id: {}", id)))
}

/// A submitted form entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSubmission")]
pub struct Submission {
    pub submission_id: SubmissionId,
    answers: BTreeMap<String, Value>,
}

impl TryFrom<RawSubmission> for Submission {
    type Error = String;

    fn try_from(raw: RawSubmission) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawSubmission::Answers {
                submission_id,
                answers,
            } => Ok(Self {
                submission_id,
                answers: answers
                    .into_iter()
                    .map(|entry| (entry.question_key, entry.value))
                    .collect(),
            }),
            RawSubmission::Flat(mut map) => {
                let id = map
                    .remove(SUBMISSION_ID)
                    .ok_or_else(|| format!("submission is missing `{}`", SUBMISSION_ID))?;
                let submission_id = submission_id_from_value(&id)
                    .ok_or_else(|| format!("invalid submission id: {}", id))?;
                Ok(Self {
                    submission_id,
                    answers: map.into_iter().collect(),
                })
            }
        }
    }
}

impl Submission {
    pub fn new(submission_id: SubmissionId) -> Self {
        Self {
            submission_id,
            answers: BTreeMap::new(),
        }
    }

    pub fn with_answer(mut self, question_key: &str, value: impl Into<Value>) -> Self {
        self.answers.insert(question_key.to_string(), value.into());
        self
    }

    /// The answer text for `question_key`, or an empty string when unanswered.
    ///
    /// Single-select answers yield their first selection.
    pub fn answer(&self, question_key: &str) -> String {
        self.answers
            .get(question_key)
            .map(answer_text)
            .unwrap_or_default()
    }

    /// Convert this submission into a literal calendar event.
    ///
    /// Offset-bearing timestamps are converted into wall time in `zone`;
    /// naive ones are taken as already local.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDateTime` if the start or end answer
    /// cannot be read as a date or datetime.
    pub fn to_event(&self, zone: Tz) -> Result<Event> {
        let start = parse_local_datetime(&self.answer(START_DATE_TIME), zone)?;
        let end = parse_local_datetime(&self.answer(END_DATE_TIME), zone)?;

        let end_recurring = self.answer(END_RECURRING);
        let recurrence_end = if end_recurring.trim().is_empty() {
            RecurrenceEnd::Never
        } else {
            match parse_local_datetime(&end_recurring, zone) {
                Ok(dt) => RecurrenceEnd::On(dt.date()),
                Err(_) => {
                    tracing::warn!(
                        submission_id = %self.submission_id,
                        value = %end_recurring,
                        "unreadable endRecurring; event will not recur"
                    );
                    RecurrenceEnd::Unparseable
                }
            }
        };

        Ok(Event {
            id: self.submission_id,
            name: self.answer(EVENT_NAME),
            start,
            end,
            event_type: self.answer(EVENT_TYPE),
            additional_info: self.answer(ADDITIONAL_INFORMATION),
            recurrence: RecurrenceRule::from_answer(&self.answer(TIME_FRAME)),
            recurrence_end,
            kind: EventKind::Literal,
        })
    }
}

fn answer_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => map
            .get("selections")
            .and_then(Value::as_array)
            .and_then(|selections| selections.first())
            .map(answer_text)
            .unwrap_or_default(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

/// Parse a submitted timestamp into local wall time.
///
/// Accepts RFC 3339 (converted into `zone`), naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// (with `T` or a space), and bare dates (midnight).
///
/// # Errors
/// Returns `CalendarError::InvalidDateTime` if no accepted layout matches.
pub fn parse_local_datetime(raw: &str, zone: Tz) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&zone).naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ndt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| CalendarError::InvalidDateTime(raw.to_string()))
}

/// Convert submissions into literal events, skipping the ones whose dates
/// cannot be read. Such entries could never be placed on a day anyway.
pub fn events_from_submissions(submissions: &[Submission], zone: Tz) -> Vec<Event> {
    submissions
        .iter()
        .filter_map(|submission| match submission.to_event(zone) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(
                    submission_id = %submission.submission_id,
                    error = %e,
                    "skipping submission"
                );
                None
            }
        })
        .collect()
}
