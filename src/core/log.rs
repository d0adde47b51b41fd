use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::pad_left;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 40;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI color for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "user_add" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "user_edit" => Colour::Yellow,
        "refresh" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)`, with only the operation colored, cut to `MAX_OP_WIDTH`.
fn op_label(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&row.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = rows.iter().map(op_label).collect();
        let op_w = labels
            .iter()
            .map(|l| UnicodeWidthStr::width(strip_ansi(l).as_str()))
            .max()
            .unwrap_or(0);
        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);

        println!("📜 Internal log:\n");

        for (row, label) in rows.iter().zip(&labels) {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| row.date.clone());

            let visible_w = UnicodeWidthStr::width(strip_ansi(label).as_str());
            let padding = " ".repeat(op_w.saturating_sub(visible_w));

            println!(
                "{}: {} | {}{} => {}",
                pad_left(&row.id.to_string(), id_w),
                date,
                label,
                padding,
                row.message
            );
        }

        Ok(())
    }
}
