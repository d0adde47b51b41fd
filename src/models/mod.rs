//! Domain types shared by the store, the resolution engine and the CLI.

pub mod day_set;
pub mod entry;
pub mod location;
pub mod resolved;
pub mod rule;
pub mod user;

pub use day_set::DaySet;
pub use entry::{OneTimeDraft, OneTimeEntry, OneTimePatch};
pub use location::LocationKind;
pub use resolved::{EntrySource, ResolvedDayEntry};
pub use rule::{RecurringDraft, RecurringRule};
pub use user::{Actor, Role, SYSTEM_OWNER, User};
