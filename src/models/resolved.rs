use super::location::LocationKind;
use chrono::NaiveDate;
use serde::Serialize;

/// Where a resolved day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source_kind", content = "source_id", rename_all = "snake_case")]
pub enum EntrySource {
    OneTime(i64),
    Recurring(i64),
    Holiday,
}

impl EntrySource {
    pub fn kind_str(&self) -> &'static str {
        match self {
            EntrySource::OneTime(_) => "one_time",
            EntrySource::Recurring(_) => "recurring",
            EntrySource::Holiday => "holiday",
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            EntrySource::OneTime(id) | EntrySource::Recurring(id) => Some(*id),
            EntrySource::Holiday => None,
        }
    }

    pub fn is_holiday(&self) -> bool {
        matches!(self, EntrySource::Holiday)
    }
}

/// Display-ready outcome for one (owner, date). Only ever built by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDayEntry {
    pub owner_id: i64,
    pub date: NaiveDate,
    pub location: LocationKind,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub source: EntrySource,
}
