use crate::error::{Result, SweepError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display name used when a planner never named their event.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// A planner's event document.
///
/// The date travels as a raw string because the collection contains documents
/// whose dates never parse; those must be skipped, not rejected at
/// deserialization time. The owner id historically lives under either
/// `user_id` or `planner_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub planner_id: Option<String>,
}

impl Event {
    pub fn display_name(&self) -> &str {
        self.event_name.as_deref().unwrap_or(UNTITLED_EVENT)
    }

    /// Resolves the owning planner, preferring `user_id` over `planner_id`.
    pub fn owner_id(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.planner_id.as_deref())
    }

    /// Parses the event date. A missing field is its own error so skip logs
    /// can tell "absent" apart from "malformed"; both mean the same thing to
    /// the sweep (expiry undeterminable, skip the document).
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        match self.event_date.as_deref() {
            Some(raw) => parse_event_date(raw),
            None => Err(SweepError::MissingDate),
        }
    }
}

/// Strict `YYYY-MM-DD` parsing. Any other form means the expiry cannot be
/// determined and the caller must skip the document; never default to expired
/// or non-expired.
pub fn parse_event_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| SweepError::InvalidDate(raw.to_string()))
}
