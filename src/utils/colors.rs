//! ANSI color helper utilities for terminal output.
use crate::models::LocationKind;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

pub const HOLIDAY: &str = "\x1b[45;97;1m";

pub fn color_for_location(location: LocationKind) -> &'static str {
    match location {
        LocationKind::Office => BLUE,
        LocationKind::Home => CYAN,
        LocationKind::AnnualLeave => YELLOW,
        LocationKind::PersonalLeave => MAGENTA,
        LocationKind::PublicHoliday => HOLIDAY,
        LocationKind::Other => WHITE,
    }
}
