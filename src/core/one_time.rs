//! Mutations of one-time entries.
//!
//! Policy:
//! - a new explicit entry overwrites whatever non-holiday entry the owner
//!   already stored for that day (one row per owner and day);
//! - on a public holiday only `public_holiday` entries may be stored: other
//!   writes delete the owner's stored entry for the day and persist nothing;
//! - a stored `public_holiday` entry is preserved against non-holiday writes.
//!
//! With `HolidayPolicy::Reject` the last two cases fail with
//! `AppError::Conflict` instead and leave the store untouched.

use crate::config::HolidayPolicy;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{one_time, users};
use crate::errors::{AppError, AppResult};
use crate::holidays::HolidayCalendar;
use crate::models::entry::normalize_notes;
use crate::models::{Actor, LocationKind, OneTimeDraft, OneTimeEntry, OneTimePatch};
use crate::utils::date::{days_in_range, format_date};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Inserted, or updated in place.
    Saved(OneTimeEntry),
    /// An explicit `public_holiday` entry was already stored and kept.
    Preserved(OneTimeEntry),
    /// The day is a public holiday; nothing was stored. `removed` is the id
    /// of the owner's previous entry for the day, if one was deleted.
    HolidayWins {
        date: NaiveDate,
        holiday: String,
        removed: Option<i64>,
    },
}

impl UpsertOutcome {
    pub fn entry(&self) -> Option<&OneTimeEntry> {
        match self {
            UpsertOutcome::Saved(e) | UpsertOutcome::Preserved(e) => Some(e),
            UpsertOutcome::HolidayWins { .. } => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, UpsertOutcome::Saved(_))
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            UpsertOutcome::Saved(e) | UpsertOutcome::Preserved(e) => e.date,
            UpsertOutcome::HolidayWins { date, .. } => *date,
        }
    }
}

/// Result of a multi-day write, one outcome per day in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeReport {
    pub outcomes: Vec<UpsertOutcome>,
}

impl RangeReport {
    pub fn saved(&self) -> Vec<&OneTimeEntry> {
        self.outcomes
            .iter()
            .filter(|o| o.is_saved())
            .filter_map(UpsertOutcome::entry)
            .collect()
    }

    /// Days where nothing new was stored.
    pub fn skipped(&self) -> Vec<&UpsertOutcome> {
        self.outcomes.iter().filter(|o| !o.is_saved()).collect()
    }
}

/// What a write to (owner, date) runs into.
enum DayCheck {
    Clear,
    Holiday {
        name: String,
        existing: Option<OneTimeEntry>,
    },
    ExplicitHoliday(OneTimeEntry),
}

pub struct OneTimeLogic<'a> {
    holidays: &'a HolidayCalendar,
    policy: HolidayPolicy,
}

impl<'a> OneTimeLogic<'a> {
    pub fn new(holidays: &'a HolidayCalendar, policy: HolidayPolicy) -> Self {
        Self { holidays, policy }
    }

    /// `skip_id` is the entry being edited: it never blocks itself.
    fn check_day(
        &self,
        conn: &Connection,
        owner_id: i64,
        date: NaiveDate,
        location: LocationKind,
        skip_id: Option<i64>,
    ) -> AppResult<DayCheck> {
        if location.is_public_holiday() {
            return Ok(DayCheck::Clear);
        }

        let existing = one_time::get_for_day(conn, owner_id, &date)?
            .filter(|e| Some(e.id) != skip_id);

        if let Some(e) = existing.as_ref()
            && e.location.is_public_holiday()
        {
            return Ok(DayCheck::ExplicitHoliday(e.clone()));
        }

        if let Some(h) = self.holidays.holiday_for(date) {
            return Ok(DayCheck::Holiday {
                name: h.name.clone(),
                existing,
            });
        }

        Ok(DayCheck::Clear)
    }

    fn conflict(&self, date: NaiveDate, reason: &str) -> AppResult<()> {
        match self.policy {
            HolidayPolicy::Reject => Err(AppError::Conflict(format!(
                "{}: {}",
                format_date(&date),
                reason
            ))),
            HolidayPolicy::Discard => Ok(()),
        }
    }

    /// One day, inside the caller's transaction.
    fn apply_day(&self, conn: &Connection, draft: &OneTimeDraft) -> AppResult<UpsertOutcome> {
        match self.check_day(conn, draft.owner_id, draft.date, draft.location, None)? {
            DayCheck::ExplicitHoliday(existing) => {
                self.conflict(draft.date, "an explicit public_holiday entry is stored")?;
                debug!("kept public_holiday entry {} on {}", existing.id, existing.date);
                Ok(UpsertOutcome::Preserved(existing))
            }
            DayCheck::Holiday { name, existing } => {
                self.conflict(draft.date, &format!("{name} is a public holiday"))?;
                let removed = match existing {
                    Some(e) => {
                        one_time::delete(conn, e.id)?;
                        audit(
                            conn,
                            "del",
                            &format!("entry:{}", e.id),
                            &format!("Removed {} entry on public holiday {}", e.location, name),
                        )?;
                        Some(e.id)
                    }
                    None => None,
                };
                Ok(UpsertOutcome::HolidayWins {
                    date: draft.date,
                    holiday: name,
                    removed,
                })
            }
            DayCheck::Clear => {
                let saved = one_time::upsert(conn, draft)?;
                audit(
                    conn,
                    "add",
                    &format!("entry:{}", saved.id),
                    &format!(
                        "{} {} for user {}",
                        saved.date_str(),
                        saved.location,
                        saved.owner_id
                    ),
                )?;
                Ok(UpsertOutcome::Saved(saved))
            }
        }
    }

    /// Create or overwrite the entry of (owner, date).
    pub fn upsert(
        &self,
        pool: &mut DbPool,
        actor: &Actor,
        draft: &OneTimeDraft,
    ) -> AppResult<UpsertOutcome> {
        actor.ensure_can_act_for(draft.owner_id, "entries")?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_owner(&tx, draft.owner_id)?;
        let outcome = self.apply_day(&tx, draft)?;
        tx.commit()?;

        Ok(outcome)
    }

    /// Write `first` to every day of `[first.date, last]` in one transaction.
    /// Any error rolls the whole range back.
    pub fn upsert_range(
        &self,
        pool: &mut DbPool,
        actor: &Actor,
        first: &OneTimeDraft,
        last: NaiveDate,
    ) -> AppResult<RangeReport> {
        if last < first.date {
            return Err(AppError::validation(format!(
                "range end {} is before start {}",
                format_date(&last),
                format_date(&first.date)
            )));
        }
        actor.ensure_can_act_for(first.owner_id, "entries")?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_owner(&tx, first.owner_id)?;

        let mut report = RangeReport::default();
        for date in days_in_range(first.date, last) {
            let draft = OneTimeDraft {
                date,
                ..first.clone()
            };
            report.outcomes.push(self.apply_day(&tx, &draft)?);
        }

        tx.commit()?;
        debug!(
            "range {}..={} for user {}: {} saved, {} skipped",
            first.date,
            last,
            first.owner_id,
            report.saved().len(),
            report.skipped().len()
        );
        Ok(report)
    }

    /// Edit an entry by id. Moving it onto a day that already holds another
    /// entry of the same owner replaces that entry. A blocked edit changes
    /// nothing.
    pub fn update(
        &self,
        pool: &mut DbPool,
        actor: &Actor,
        id: i64,
        patch: &OneTimePatch,
    ) -> AppResult<UpsertOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current =
            one_time::get(&tx, id)?.ok_or_else(|| AppError::not_found(format!("entry {id}")))?;
        actor.ensure_can_act_for(current.owner_id, &format!("entry {id}"))?;

        let mut next = current.clone();
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(location) = patch.location {
            next.location = location;
        }
        if let Some(notes) = patch.notes.as_deref() {
            next.notes = normalize_notes(Some(notes));
        }

        match self.check_day(&tx, next.owner_id, next.date, next.location, Some(id))? {
            DayCheck::ExplicitHoliday(existing) => {
                self.conflict(next.date, "an explicit public_holiday entry is stored")?;
                return Ok(UpsertOutcome::Preserved(existing));
            }
            DayCheck::Holiday { name, .. } => {
                self.conflict(next.date, &format!("{name} is a public holiday"))?;
                return Ok(UpsertOutcome::HolidayWins {
                    date: next.date,
                    holiday: name,
                    removed: None,
                });
            }
            DayCheck::Clear => {}
        }

        if next.date != current.date
            && let Some(other) = one_time::get_for_day(&tx, next.owner_id, &next.date)?
        {
            one_time::delete(&tx, other.id)?;
        }

        if !one_time::update(&tx, &next)? {
            return Err(AppError::not_found(format!("entry {id}")));
        }
        audit(
            &tx,
            "edit",
            &format!("entry:{id}"),
            &format!("{} {} for user {}", next.date_str(), next.location, next.owner_id),
        )?;
        tx.commit()?;

        Ok(UpsertOutcome::Saved(next))
    }

    /// Remove the owner's stored `public_holiday` entries in the range and
    /// store the calendar's holidays in their place. Returns how many were
    /// stored.
    pub fn refresh_holidays(
        &self,
        pool: &mut DbPool,
        actor: &Actor,
        owner_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<usize> {
        actor.ensure_can_act_for(owner_id, "entries")?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_owner(&tx, owner_id)?;

        let removed = one_time::delete_holidays_in_range(&tx, owner_id, &start, &end)?;
        let holidays = self.holidays.holidays_in_range(start, end);
        for h in &holidays {
            let draft = OneTimeDraft::new(owner_id, h.date, LocationKind::PublicHoliday)
                .notes(h.name.clone());
            one_time::upsert(&tx, &draft)?;
        }

        audit(
            &tx,
            "refresh",
            &format!("user:{owner_id}"),
            &format!(
                "Public holidays {}..{}: removed {}, stored {}",
                format_date(&start),
                format_date(&end),
                removed,
                holidays.len()
            ),
        )?;
        tx.commit()?;

        Ok(holidays.len())
    }
}

/// Delete by id. Only the owner or an admin may delete.
pub fn delete(pool: &mut DbPool, actor: &Actor, id: i64) -> AppResult<bool> {
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let entry =
        one_time::get(&tx, id)?.ok_or_else(|| AppError::not_found(format!("entry {id}")))?;
    actor.ensure_can_act_for(entry.owner_id, &format!("entry {id}"))?;

    let deleted = one_time::delete(&tx, id)?;
    audit(
        &tx,
        "del",
        &format!("entry:{id}"),
        &format!("{} {} for user {}", entry.date_str(), entry.location, entry.owner_id),
    )?;
    tx.commit()?;

    Ok(deleted)
}

/// Stored entries of an owner, newest first, optionally limited to a range.
/// Only the owner or an admin may list them.
pub fn list(
    conn: &Connection,
    actor: &Actor,
    owner_id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<OneTimeEntry>> {
    ensure_owner(conn, owner_id)?;
    actor.ensure_can_act_for(owner_id, &format!("entries of user {owner_id}"))?;

    match range {
        Some((start, end)) => {
            let mut entries = one_time::list_by_owner_in_range(conn, owner_id, &start, &end)?;
            entries.reverse();
            Ok(entries)
        }
        None => one_time::list_by_owner(conn, owner_id),
    }
}

pub(crate) fn ensure_owner(conn: &Connection, owner_id: i64) -> AppResult<()> {
    users::get(conn, owner_id)?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(format!("user {owner_id}")))
}
