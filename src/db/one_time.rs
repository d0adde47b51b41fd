//! Store operations for one-time entries.

use crate::errors::{AppError, AppResult};
use crate::models::entry::{OneTimeDraft, OneTimeEntry};
use crate::models::location::LocationKind;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const COLUMNS: &str = "id, owner_id, date, location, notes, created_at";

pub(crate) fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<OneTimeEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(2, AppError::validation(format!("bad stored date {date_str}"))))?;

    let loc_str: String = row.get("location")?;
    let location = LocationKind::from_db_str(&loc_str).ok_or_else(|| {
        conversion_error(3, AppError::validation(format!("bad stored location {loc_str}")))
    })?;

    Ok(OneTimeEntry {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        date,
        location,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

fn collect(rows: impl Iterator<Item = Result<OneTimeEntry>>) -> AppResult<Vec<OneTimeEntry>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<OneTimeEntry>> {
    let sql = format!("SELECT {COLUMNS} FROM one_time_entries WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn get_for_day(
    conn: &Connection,
    owner_id: i64,
    date: &NaiveDate,
) -> AppResult<Option<OneTimeEntry>> {
    let sql = format!("SELECT {COLUMNS} FROM one_time_entries WHERE owner_id = ?1 AND date = ?2");
    Ok(conn
        .query_row(&sql, params![owner_id, format_date(date)], map_row)
        .optional()?)
}

/// Newest first.
pub fn list_by_owner(conn: &Connection, owner_id: i64) -> AppResult<Vec<OneTimeEntry>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM one_time_entries WHERE owner_id = ?1 ORDER BY date DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([owner_id], map_row)?;
    collect(rows)
}

pub fn list_by_owner_in_range(
    conn: &Connection,
    owner_id: i64,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<OneTimeEntry>> {
    list_for_owners_in_range(conn, &[owner_id], start, end)
}

/// All owners.
pub fn list_in_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<OneTimeEntry>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM one_time_entries
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, owner_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![format_date(start), format_date(end)], map_row)?;
    collect(rows)
}

/// Entries of the given owners in `[start, end]`, ordered by date then owner.
pub fn list_for_owners_in_range(
    conn: &Connection,
    owner_ids: &[i64],
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<Vec<OneTimeEntry>> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }

    // ?1 and ?2 are the bounds, owners follow
    let placeholders: Vec<String> = (0..owner_ids.len()).map(|i| format!("?{}", i + 3)).collect();
    let sql = format!(
        "SELECT {COLUMNS} FROM one_time_entries
         WHERE date BETWEEN ?1 AND ?2 AND owner_id IN ({})
         ORDER BY date ASC, owner_id ASC",
        placeholders.join(",")
    );

    let mut values: Vec<rusqlite::types::Value> = vec![
        format_date(start).into(),
        format_date(end).into(),
    ];
    values.extend(owner_ids.iter().map(|id| rusqlite::types::Value::from(*id)));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_row)?;
    collect(rows)
}

/// Insert, or overwrite location and notes of the row already stored for
/// (owner, date). The UNIQUE(owner_id, date) constraint makes this safe
/// against concurrent writers.
pub fn upsert(conn: &Connection, draft: &OneTimeDraft) -> AppResult<OneTimeEntry> {
    let sql = format!(
        "INSERT INTO one_time_entries (owner_id, date, location, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(owner_id, date) DO UPDATE SET
             location = excluded.location,
             notes = excluded.notes
         RETURNING {COLUMNS}"
    );
    let entry = conn.query_row(
        &sql,
        params![
            draft.owner_id,
            format_date(&draft.date),
            draft.location.to_db_str(),
            draft.normalized_notes(),
            OneTimeDraft::created_now(),
        ],
        map_row,
    )?;
    Ok(entry)
}

/// Update all mutable fields of an existing row. Returns false if it vanished.
pub fn update(conn: &Connection, entry: &OneTimeEntry) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE one_time_entries
         SET date = ?1, location = ?2, notes = ?3
         WHERE id = ?4",
        params![
            format_date(&entry.date),
            entry.location.to_db_str(),
            entry.notes,
            entry.id,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<bool> {
    let changed = conn.execute("DELETE FROM one_time_entries WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

/// Remove the owner's stored `public_holiday` rows in the range.
pub fn delete_holidays_in_range(
    conn: &Connection,
    owner_id: i64,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<usize> {
    let changed = conn.execute(
        "DELETE FROM one_time_entries
         WHERE owner_id = ?1 AND location = 'public_holiday' AND date BETWEEN ?2 AND ?3",
        params![owner_id, format_date(start), format_date(end)],
    )?;
    Ok(changed)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM one_time_entries", [], |row| row.get(0))?)
}
