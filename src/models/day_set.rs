//! Weekday set stored as a 7-bit mask (bit 0 = Monday … bit 6 = Sunday).

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const FULL_MASK: u8 = 0b111_1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub fn empty() -> Self {
        DaySet(0)
    }

    pub fn weekdays() -> Self {
        DaySet(0b001_1111)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Build from the stored mask. Bits above Sunday are rejected.
    pub fn from_mask(mask: u8) -> AppResult<Self> {
        if mask & !FULL_MASK != 0 {
            return Err(AppError::validation(format!("invalid weekday mask {mask:#09b}")));
        }
        Ok(DaySet(mask))
    }

    pub fn mask(&self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in Mon..Sun order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|d| self.contains(*d))
    }

    /// Parse `mon,wed,fri`, full names, or ranges such as `mon-fri`.
    ///
    /// An empty input parses to an empty set; callers that need at least one
    /// day validate that separately.
    pub fn parse(input: &str) -> AppResult<Self> {
        let mut set = DaySet::empty();

        for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some((from, to)) = token.split_once('-') {
                let start = parse_weekday(from)?;
                let end = parse_weekday(to)?;
                let mut day = start;
                set.insert(day);
                while day != end {
                    day = day.succ();
                    set.insert(day);
                }
            } else {
                set.insert(parse_weekday(token)?);
            }
        }

        Ok(set)
    }
}

fn parse_weekday(s: &str) -> AppResult<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::validation(format!("invalid weekday '{}'", s.trim())))
}

fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(short_name).collect();
        f.write_str(&names.join(","))
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(short_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_only_inserted_days() {
        let set = DaySet::empty().with(Weekday::Mon).with(Weekday::Wed);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(!set.contains(Weekday::Tue));
        assert_eq!(set.len(), 2);
        assert_eq!(set.mask(), 0b101);
    }

    #[test]
    fn parses_lists_and_ranges() {
        let set = DaySet::parse("mon-wed, friday").unwrap();
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(
            days,
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(set.to_string(), "mon,tue,wed,fri");
    }

    #[test]
    fn wrapping_range_covers_weekend() {
        let set = DaySet::parse("sat-mon").unwrap();
        assert_eq!(set.to_string(), "mon,sat,sun");
    }

    #[test]
    fn rejects_garbage() {
        assert!(DaySet::parse("mon,funday").is_err());
        assert!(DaySet::from_mask(0b1000_0000).is_err());
        assert!(DaySet::parse("").unwrap().is_empty());
    }

    #[test]
    fn covers_checks_date_weekday() {
        // 2025-06-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(DaySet::weekdays().covers(monday));
        assert!(!DaySet::weekdays().covers(monday + chrono::Days::new(5)));
    }
}
