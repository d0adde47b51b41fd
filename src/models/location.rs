use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an owner spends a day. Closed set: resolution logic matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Home,
    Office,
    AnnualLeave,
    PersonalLeave,
    PublicHoliday,
    Other,
}

impl LocationKind {
    pub const ALL: [LocationKind; 6] = [
        LocationKind::Home,
        LocationKind::Office,
        LocationKind::AnnualLeave,
        LocationKind::PersonalLeave,
        LocationKind::PublicHoliday,
        LocationKind::Other,
    ];

    /// Short CLI code.
    pub fn code(&self) -> &'static str {
        match self {
            LocationKind::Home => "h",
            LocationKind::Office => "o",
            LocationKind::AnnualLeave => "al",
            LocationKind::PersonalLeave => "pl",
            LocationKind::PublicHoliday => "ph",
            LocationKind::Other => "x",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LocationKind::Home => "home",
            LocationKind::Office => "office",
            LocationKind::AnnualLeave => "annual_leave",
            LocationKind::PersonalLeave => "personal_leave",
            LocationKind::PublicHoliday => "public_holiday",
            LocationKind::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.to_db_str() == s)
    }

    /// Accepts the stored name or the short code, in any case.
    pub fn parse(input: &str) -> AppResult<Self> {
        let needle = input.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|l| l.to_db_str() == needle || l.code() == needle)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "invalid location '{}'. Use one of: home, office, annual_leave, personal_leave, public_holiday, other",
                    input
                ))
            })
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::Home => "Home",
            LocationKind::Office => "Office",
            LocationKind::AnnualLeave => "Annual leave",
            LocationKind::PersonalLeave => "Personal leave",
            LocationKind::PublicHoliday => "Public holiday",
            LocationKind::Other => "Other",
        }
    }

    pub fn is_public_holiday(&self) -> bool {
        matches!(self, LocationKind::PublicHoliday)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_codes() {
        assert_eq!(LocationKind::parse("office").unwrap(), LocationKind::Office);
        assert_eq!(LocationKind::parse("O").unwrap(), LocationKind::Office);
        assert_eq!(
            LocationKind::parse("Annual-Leave").unwrap(),
            LocationKind::AnnualLeave
        );
        assert_eq!(
            LocationKind::parse("ph").unwrap(),
            LocationKind::PublicHoliday
        );
    }

    #[test]
    fn rejects_unknown_location() {
        let err = LocationKind::parse("beach").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn db_strings_are_stable() {
        for loc in LocationKind::ALL {
            assert_eq!(LocationKind::from_db_str(loc.to_db_str()), Some(loc));
        }
        assert_eq!(LocationKind::from_db_str("Office"), None);
    }
}
