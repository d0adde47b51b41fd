//! Schema migrations.
//!
//! Each migration runs once; applied versions are recorded in the `log`
//! table with `operation = 'migration_applied'`.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use log::info;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_create_users",
        description: "Create users table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            display_name  TEXT NOT NULL,
            role          TEXT NOT NULL DEFAULT 'user' CHECK(role IN ('user','admin')),
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250601_0002_create_one_time_entries",
        description: "Create one_time_entries with one row per owner and day",
        sql: r#"
        CREATE TABLE IF NOT EXISTS one_time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date        TEXT NOT NULL,
            location    TEXT NOT NULL CHECK(location IN
                        ('home','office','annual_leave','personal_leave','public_holiday','other')),
            notes       TEXT,
            created_at  TEXT NOT NULL,
            UNIQUE(owner_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_one_time_date ON one_time_entries(date);
        "#,
    },
    Migration {
        version: "20250601_0003_create_recurring_rules",
        description: "Create recurring_rules with weekday bitmask",
        sql: r#"
        CREATE TABLE IF NOT EXISTS recurring_rules (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            location    TEXT NOT NULL CHECK(location IN
                        ('home','office','annual_leave','personal_leave','public_holiday','other')),
            days_mask   INTEGER NOT NULL CHECK(days_mask BETWEEN 1 AND 127),
            notes       TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_recurring_owner ON recurring_rules(owner_id);
        "#,
    },
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already applied, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns how many were applied.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        // another process may have applied it since the check above
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if is_applied(&tx, m.version)? {
            continue;
        }
        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![Local::now().to_rfc3339(), m.version, m.description],
        )?;
        tx.commit()?;

        info!("migration applied: {} ({})", m.version, m.description);
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&mut conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&mut conn).unwrap(), 0);
        assert_eq!(applied_migrations(&conn).unwrap().len(), MIGRATIONS.len());
    }
}
