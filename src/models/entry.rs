use super::location::LocationKind;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// A single-day, explicitly stored work-location record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneTimeEntry {
    pub id: i64,
    pub owner_id: i64,        // ⇔ one_time_entries.owner_id
    pub date: NaiveDate,      // ⇔ one_time_entries.date (TEXT "YYYY-MM-DD")
    pub location: LocationKind,
    pub notes: Option<String>,
    pub created_at: String,   // ⇔ one_time_entries.created_at (TEXT, RFC 3339)
}

impl OneTimeEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Input for creating or overwriting the entry of (owner, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeDraft {
    pub owner_id: i64,
    pub date: NaiveDate,
    pub location: LocationKind,
    pub notes: Option<String>,
}

impl OneTimeDraft {
    pub fn new(owner_id: i64, date: NaiveDate, location: LocationKind) -> Self {
        Self {
            owner_id,
            date,
            location,
            notes: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Blank notes are stored as NULL.
    pub(crate) fn normalized_notes(&self) -> Option<String> {
        normalize_notes(self.notes.as_deref())
    }

    pub(crate) fn created_now() -> String {
        Local::now().to_rfc3339()
    }
}

/// Partial update of an existing entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneTimePatch {
    pub date: Option<NaiveDate>,
    pub location: Option<LocationKind>,
    pub notes: Option<String>,
}

impl OneTimePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.location.is_none() && self.notes.is_none()
    }
}

pub(crate) fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
