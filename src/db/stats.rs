use crate::db::migrate::applied_migrations;
use crate::db::pool::DbPool;
use crate::db::{one_time, recurring, users};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let conn = &pool.conn;
    println!(
        "{}• Team members:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        users::count(conn)?,
        RESET
    );
    println!(
        "{}• One-time entries:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        one_time::count(conn)?,
        RESET
    );
    println!(
        "{}• Recurring rules:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        recurring::count(conn)?,
        RESET
    );

    //
    // 3) DATE RANGE
    //
    let bounds: Option<(Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM one_time_entries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = bounds.unwrap_or((None, None));
    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) SCHEMA
    //
    let migrations = applied_migrations(conn)?;
    println!("{}• Migrations:{} {}", CYAN, RESET, migrations.len());
    for m in migrations {
        println!("    {GREY}{m}{RESET}");
    }

    println!();
    Ok(())
}
