//! Store operations for team members.

use crate::db::one_time::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const COLUMNS: &str = "id, username, display_name, role, created_at";

fn map_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        conversion_error(3, AppError::validation(format!("bad stored role {role_str}")))
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        display_name: row.get("display_name")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, username: &str, display_name: &str, role: Role) -> AppResult<User> {
    let sql = format!(
        "INSERT INTO users (username, display_name, role, created_at)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING {COLUMNS}"
    );
    let user = conn.query_row(
        &sql,
        params![username, display_name, role.to_db_str(), Local::now().to_rfc3339()],
        map_row,
    )?;
    Ok(user)
}

pub fn update_display_name(conn: &Connection, id: i64, display_name: &str) -> AppResult<Option<User>> {
    let sql = format!("UPDATE users SET display_name = ?1 WHERE id = ?2 RETURNING {COLUMNS}");
    Ok(conn
        .query_row(&sql, params![display_name, id], map_row)
        .optional()?)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users WHERE username = ?1");
    Ok(conn.query_row(&sql, [username], map_row).optional()?)
}

/// Ordered by display name, like the team page.
pub fn list(conn: &Connection) -> AppResult<Vec<User>> {
    let sql = format!("SELECT {COLUMNS} FROM users ORDER BY display_name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}
