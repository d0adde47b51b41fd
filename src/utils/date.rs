//! Calendar-day helpers. Dates are `NaiveDate` everywhere; no time of day,
//! no time zone.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static ISO_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO day pattern"));

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD` parsing.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if !ISO_DAY.is_match(s) {
        return Err(AppError::validation(format!(
            "invalid date '{}': expected YYYY-MM-DD",
            s
        )));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid calendar day '{}'", s)))
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Every day in `[start, end]`; empty when `end < start`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut next = (start <= end).then_some(start);
    std::iter::from_fn(move || {
        let current = next?;
        next = current.checked_add_days(Days::new(1)).filter(|d| *d <= end);
        Some(current)
    })
}

pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

pub fn current_month() -> (NaiveDate, NaiveDate) {
    let t = today();
    // month_bounds cannot fail for a date chrono already produced
    month_bounds(t.year(), t.month()).unwrap_or((t, t))
}

/// `[from, from + 12 months]`. Feb 29 ends on Feb 28.
pub fn year_ahead(from: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = from.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
    (from, end)
}

/// Parse a period expression into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::validation(format!(
                "invalid period '{}': start and end must have the same format",
                p
            )));
        }

        let (from, _) = parse_bound(start)?;
        let (_, to) = parse_bound(end)?;
        return Ok((from, to));
    }

    parse_bound(p.trim())
}

/// Period from an optional CLI argument, defaulting to the current month.
pub fn resolve_period(period: Option<&str>) -> AppResult<(NaiveDate, NaiveDate)> {
    match period {
        Some(p) => parse_period(p),
        None => Ok(current_month()),
    }
}

fn parse_bound(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::validation(format!("invalid period '{}'", s));

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        // YYYY-MM
        7 if s.is_ascii() && s.as_bytes()[4] == b'-' => {
            let y: i32 = s[0..4].parse().map_err(|_| invalid())?;
            let m: u32 = s[5..7].parse().map_err(|_| invalid())?;
            month_bounds(y, m).ok_or_else(invalid)
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(s)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}
