//! Resolution engine: merges public holidays, one-time entries and recurring
//! rules into at most one entry per (owner, day).
//!
//! Precedence, first match wins:
//! 1. public holiday, unless the owner stored an explicit `public_holiday` entry
//! 2. the stored one-time entry
//! 3. the matching recurring rule with the lowest id
//!
//! The location filter is applied to the winner only, so a filtered-out
//! holiday never lets a stored `office` entry through.

use crate::db::{one_time, recurring};
use crate::errors::AppResult;
use crate::holidays::{Holiday, HolidayCalendar};
use crate::models::{
    EntrySource, LocationKind, OneTimeEntry, RecurringRule, ResolvedDayEntry, SYSTEM_OWNER,
};
use crate::utils::date::days_in_range;
use chrono::NaiveDate;
use log::debug;
use rusqlite::Connection;
use std::collections::{BTreeMap, HashMap};

/// Whose calendar is being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// One owner; holidays are attributed to that owner.
    Personal { owner_id: i64 },
    /// Several owners; holidays appear once per day under `SYSTEM_OWNER`.
    Team { owner_ids: Vec<i64> },
}

impl ViewMode {
    fn owners(&self) -> Vec<i64> {
        let mut owners = match self {
            ViewMode::Personal { owner_id } => vec![*owner_id],
            ViewMode::Team { owner_ids } => owner_ids.clone(),
        };
        owners.retain(|id| *id != SYSTEM_OWNER);
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    fn is_team(&self) -> bool {
        matches!(self, ViewMode::Team { .. })
    }
}

/// Decide the single entry for one owner on one day. Pure.
pub fn merge_day(
    owner_id: i64,
    date: NaiveDate,
    holiday: Option<&Holiday>,
    stored: Option<&OneTimeEntry>,
    rules: &[RecurringRule],
) -> Option<ResolvedDayEntry> {
    let explicit_holiday = stored.is_some_and(|e| e.location.is_public_holiday());

    if let Some(h) = holiday
        && !explicit_holiday
    {
        return Some(holiday_entry(owner_id, h));
    }

    if let Some(e) = stored {
        return Some(ResolvedDayEntry {
            owner_id,
            date,
            location: e.location,
            notes: e.notes.clone(),
            source: EntrySource::OneTime(e.id),
        });
    }

    rules
        .iter()
        .filter(|r| r.days.covers(date))
        .min_by_key(|r| r.id)
        .map(|r| ResolvedDayEntry {
            owner_id,
            date,
            location: r.location,
            notes: r.notes.clone(),
            source: EntrySource::Recurring(r.id),
        })
}

fn holiday_entry(owner_id: i64, h: &Holiday) -> ResolvedDayEntry {
    ResolvedDayEntry {
        owner_id,
        date: h.date,
        location: LocationKind::PublicHoliday,
        notes: Some(h.name.clone()),
        source: EntrySource::Holiday,
    }
}

fn keep(entry: &ResolvedDayEntry, filter: Option<LocationKind>) -> bool {
    filter.is_none_or(|loc| entry.location == loc)
}

pub struct ResolveLogic;

impl ResolveLogic {
    /// Resolve every day of `[start, end]` for the owners of `view`.
    ///
    /// Output is ordered by date, then owner id. An inverted range yields an
    /// empty result. Only store errors are returned.
    pub fn resolve(
        conn: &Connection,
        holidays: &HolidayCalendar,
        view: &ViewMode,
        start: NaiveDate,
        end: NaiveDate,
        filter: Option<LocationKind>,
    ) -> AppResult<Vec<ResolvedDayEntry>> {
        if end < start {
            return Ok(Vec::new());
        }

        let owners = view.owners();
        let team = view.is_team();

        let stored: HashMap<(i64, NaiveDate), OneTimeEntry> =
            one_time::list_for_owners_in_range(conn, &owners, &start, &end)?
                .into_iter()
                .map(|e| ((e.owner_id, e.date), e))
                .collect();

        let mut rules: HashMap<i64, Vec<RecurringRule>> = HashMap::new();
        for rule in recurring::list_for_owners(conn, &owners)? {
            rules.entry(rule.owner_id).or_default().push(rule);
        }

        let mut out = Vec::new();
        for date in days_in_range(start, end) {
            let holiday = holidays.holiday_for(date);

            if team && let Some(h) = holiday {
                let system = holiday_entry(SYSTEM_OWNER, h);
                if keep(&system, filter) {
                    out.push(system);
                }
            }

            for owner in &owners {
                let entry = merge_day(
                    *owner,
                    date,
                    holiday,
                    stored.get(&(*owner, date)),
                    rules.get(owner).map(Vec::as_slice).unwrap_or(&[]),
                );

                let Some(entry) = entry else { continue };

                // covered by the single system row
                if team && entry.source.is_holiday() {
                    continue;
                }

                if keep(&entry, filter) {
                    out.push(entry);
                }
            }
        }

        debug!(
            "resolved {} entries for {} owner(s) in {}..={} (team={})",
            out.len(),
            owners.len(),
            start,
            end,
            team
        );

        Ok(out)
    }

    /// Personal view of a single day.
    pub fn resolve_day(
        conn: &Connection,
        holidays: &HolidayCalendar,
        owner_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<ResolvedDayEntry>> {
        let view = ViewMode::Personal { owner_id };
        Ok(Self::resolve(conn, holidays, &view, date, date, None)?
            .into_iter()
            .next())
    }
}

/// Per-day counts by location, for the team overview header.
pub fn coverage_summary(
    entries: &[ResolvedDayEntry],
) -> BTreeMap<NaiveDate, BTreeMap<LocationKind, usize>> {
    let mut out: BTreeMap<NaiveDate, BTreeMap<LocationKind, usize>> = BTreeMap::new();
    for e in entries {
        *out.entry(e.date).or_default().entry(e.location).or_default() += 1;
    }
    out
}
