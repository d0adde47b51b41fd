use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &mut Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

/// Open the database at `path` and bring its schema up to date.
pub fn open_db(path: &str, busy_timeout_ms: u64) -> AppResult<DbPool> {
    let mut pool = DbPool::with_timeout(path, busy_timeout_ms)?;
    init_db(&mut pool.conn)?;
    Ok(pool)
}

/// Fresh in-memory database with the full schema.
pub fn open_db_in_memory() -> AppResult<DbPool> {
    let mut pool = DbPool::in_memory()?;
    init_db(&mut pool.conn)?;
    Ok(pool)
}
