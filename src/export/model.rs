// src/export/model.rs

use crate::models::{ResolvedDayEntry, SYSTEM_OWNER, User};
use serde::Serialize;
use std::collections::HashMap;

/// Flat row for CSV / JSON export of the resolved calendar.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedExport {
    pub date: String,
    pub owner_id: i64,
    pub owner: String,
    pub location: String,
    pub notes: String,
    pub source_kind: String,
    pub source_id: Option<i64>,
}

impl ResolvedExport {
    /// `names` maps owner ids to usernames; the system owner is `team`.
    pub fn from_entry(e: &ResolvedDayEntry, names: &HashMap<i64, String>) -> Self {
        let owner = if e.owner_id == SYSTEM_OWNER {
            "team".to_string()
        } else {
            names
                .get(&e.owner_id)
                .cloned()
                .unwrap_or_else(|| e.owner_id.to_string())
        };

        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            owner_id: e.owner_id,
            owner,
            location: e.location.to_db_str().to_string(),
            notes: e.notes.clone().unwrap_or_default(),
            source_kind: e.source.kind_str().to_string(),
            source_id: e.source.id(),
        }
    }
}

pub(crate) fn username_index(users: &[User]) -> HashMap<i64, String> {
    users.iter().map(|u| (u.id, u.username.clone())).collect()
}
