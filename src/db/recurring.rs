//! Store operations for recurring weekly rules.

use crate::db::one_time::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::day_set::DaySet;
use crate::models::entry::normalize_notes;
use crate::models::location::LocationKind;
use crate::models::rule::{RecurringDraft, RecurringRule};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const COLUMNS: &str = "id, owner_id, location, days_mask, notes, created_at";

pub fn map_row(row: &Row) -> Result<RecurringRule> {
    let loc_str: String = row.get("location")?;
    let location = LocationKind::from_db_str(&loc_str).ok_or_else(|| {
        conversion_error(2, AppError::validation(format!("bad stored location {loc_str}")))
    })?;

    let mask: u8 = row.get("days_mask")?;
    let days = DaySet::from_mask(mask).map_err(|e| conversion_error(3, e))?;

    Ok(RecurringRule {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        location,
        notes: row.get("notes")?,
        days,
        created_at: row.get("created_at")?,
    })
}

fn collect(rows: impl Iterator<Item = Result<RecurringRule>>) -> AppResult<Vec<RecurringRule>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<RecurringRule>> {
    let sql = format!("SELECT {COLUMNS} FROM recurring_rules WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

/// Ordered by id, which is also the tie-break order used by the resolver.
pub fn list_by_owner(conn: &Connection, owner_id: i64) -> AppResult<Vec<RecurringRule>> {
    list_for_owners(conn, &[owner_id])
}

pub fn list_for_owners(conn: &Connection, owner_ids: &[i64]) -> AppResult<Vec<RecurringRule>> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; owner_ids.len()].join(",");
    let sql = format!(
        "SELECT {COLUMNS} FROM recurring_rules
         WHERE owner_id IN ({placeholders})
         ORDER BY owner_id ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(owner_ids.iter()), map_row)?;
    collect(rows)
}

pub fn insert(conn: &Connection, draft: &RecurringDraft) -> AppResult<RecurringRule> {
    let sql = format!(
        "INSERT INTO recurring_rules (owner_id, location, days_mask, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {COLUMNS}"
    );
    let rule = conn.query_row(
        &sql,
        params![
            draft.owner_id,
            draft.location.to_db_str(),
            draft.days.mask(),
            normalize_notes(draft.notes.as_deref()),
            Local::now().to_rfc3339(),
        ],
        map_row,
    )?;
    Ok(rule)
}

/// Overwrite location, days and notes. Returns `None` if the rule is gone.
pub fn update(conn: &Connection, id: i64, draft: &RecurringDraft) -> AppResult<Option<RecurringRule>> {
    let sql = format!(
        "UPDATE recurring_rules
         SET location = ?1, days_mask = ?2, notes = ?3
         WHERE id = ?4
         RETURNING {COLUMNS}"
    );
    Ok(conn
        .query_row(
            &sql,
            params![
                draft.location.to_db_str(),
                draft.days.mask(),
                normalize_notes(draft.notes.as_deref()),
                id,
            ],
            map_row,
        )
        .optional()?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<bool> {
    let changed = conn.execute("DELETE FROM recurring_rules WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM recurring_rules", [], |row| row.get(0))?)
}
