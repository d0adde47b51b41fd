use super::{day_set::DaySet, location::LocationKind};
use serde::Serialize;

/// Weekly-repeating rule. Never expanded into stored rows; the resolver
/// evaluates it for each requested day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringRule {
    pub id: i64,
    pub owner_id: i64,
    pub location: LocationKind,
    pub notes: Option<String>,
    pub days: DaySet, // ⇔ recurring_rules.days_mask
    pub created_at: String,
}

/// Input for `RecurringLogic::upsert`. `id = None` creates a new rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringDraft {
    pub id: Option<i64>,
    pub owner_id: i64,
    pub location: LocationKind,
    pub days: DaySet,
    pub notes: Option<String>,
}

impl RecurringDraft {
    pub fn new(owner_id: i64, location: LocationKind, days: DaySet) -> Self {
        Self {
            id: None,
            owner_id,
            location,
            days,
            notes: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn existing(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
