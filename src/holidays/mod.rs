//! Public holiday lookup.
//!
//! The calendar is a table keyed by year, loaded from YAML. Adding a year
//! is a data change: append it to the file (or point `holidays_file` in the
//! config at a custom table). Lookups never fail; dates outside the table
//! simply have no holiday.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_TABLE: &str = include_str!("qld.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct HolidayFile {
    jurisdiction: String,
    #[serde(default)]
    years: BTreeMap<i32, Vec<Holiday>>,
}

#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    jurisdiction: String,
    years: BTreeMap<i32, Vec<Holiday>>,
}

impl HolidayCalendar {
    /// The built-in Queensland table.
    pub fn builtin() -> AppResult<Self> {
        Self::from_yaml(DEFAULT_TABLE)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "cannot read holiday table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Builtin table unless a custom file is configured.
    pub fn load(custom: Option<&str>) -> AppResult<Self> {
        match custom {
            Some(p) if !p.trim().is_empty() => {
                Self::from_file(&crate::utils::path::expand_tilde(p))
            }
            _ => Self::builtin(),
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let file: HolidayFile = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("invalid holiday table: {}", e)))?;

        for (year, days) in &file.years {
            if let Some(stray) = days.iter().find(|h| h.date.year() != *year) {
                return Err(AppError::Config(format!(
                    "holiday '{}' on {} is listed under year {}",
                    stray.name, stray.date, year
                )));
            }
        }

        Ok(Self::from_parts(file.jurisdiction, file.years))
    }

    /// Build a table in code, mostly for tests and custom calendars.
    pub fn from_entries<I, S>(jurisdiction: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        let mut years: BTreeMap<i32, Vec<Holiday>> = BTreeMap::new();
        for (date, name) in entries {
            years.entry(date.year()).or_default().push(Holiday {
                date,
                name: name.into(),
            });
        }
        Self::from_parts(jurisdiction.to_string(), years)
    }

    fn from_parts(jurisdiction: String, mut years: BTreeMap<i32, Vec<Holiday>>) -> Self {
        for days in years.values_mut() {
            days.sort_by_key(|h| h.date);
            days.dedup_by_key(|h| h.date);
        }
        Self {
            jurisdiction,
            years,
        }
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn holiday_for(&self, date: NaiveDate) -> Option<&Holiday> {
        let days = self.years.get(&date.year())?;
        days.binary_search_by_key(&date, |h| h.date)
            .ok()
            .map(|idx| &days[idx])
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_for(date).is_some()
    }

    /// Holidays in `[start, end]`, ordered by date. Spans as many years as
    /// the range does.
    pub fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Holiday> {
        if end < start {
            return Vec::new();
        }
        self.years
            .range(start.year()..=end.year())
            .flat_map(|(_, days)| days.iter())
            .filter(|h| h.date >= start && h.date <= end)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn builtin_table_knows_christmas() {
        let cal = HolidayCalendar::builtin().unwrap();
        assert_eq!(cal.jurisdiction(), "Queensland");
        let h = cal.holiday_for(d("2025-12-25")).unwrap();
        assert_eq!(h.name, "Christmas Day");
        assert!(cal.holiday_for(d("2025-12-24")).is_none());
        assert_eq!(cal.years().collect::<Vec<_>>(), vec![2025, 2026]);
    }

    #[test]
    fn unknown_year_has_no_holidays() {
        let cal = HolidayCalendar::builtin().unwrap();
        assert!(cal.holiday_for(d("1999-12-25")).is_none());
        assert!(cal
            .holidays_in_range(d("1999-01-01"), d("1999-12-31"))
            .is_empty());
    }

    #[test]
    fn range_crosses_year_boundary() {
        let cal = HolidayCalendar::builtin().unwrap();
        let names: Vec<&str> = cal
            .holidays_in_range(d("2025-12-24"), d("2026-01-02"))
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["Christmas Day", "Boxing Day", "New Year's Day"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let cal = HolidayCalendar::builtin().unwrap();
        assert!(cal
            .holidays_in_range(d("2025-12-31"), d("2025-01-01"))
            .is_empty());
    }

    #[test]
    fn custom_yaml_table_is_sorted() {
        let yaml = r#"
jurisdiction: Testland
years:
  2027:
    - { date: "2027-03-02", name: "Second" }
    - { date: "2027-03-01", name: "First" }
"#;
        let cal = HolidayCalendar::from_yaml(yaml).unwrap();
        let all = cal.holidays_in_range(d("2027-01-01"), d("2027-12-31"));
        assert_eq!(all[0].name, "First");
        assert_eq!(all[1].name, "Second");
    }

    #[test]
    fn misplaced_year_is_rejected() {
        let yaml = r#"
jurisdiction: Testland
years:
  2027:
    - { date: "2028-01-01", name: "Wrong" }
"#;
        let err = HolidayCalendar::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
