//! Command handlers. Each one opens what it needs from the loaded config.

pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod holidays;
pub mod init;
pub mod list;
pub mod log;
pub mod rule;
pub mod show;
pub mod user;

use crate::config::Config;
use crate::core::one_time::UpsertOutcome;
use crate::core::users::UserLogic;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::holidays::HolidayCalendar;
use crate::models::{Actor, LocationKind};
use crate::ui::messages::{success, warning};

/// Open the configured database with the schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    open_db(&cfg.database, cfg.busy_timeout_ms)
}

pub(crate) fn load_holidays(cfg: &Config) -> AppResult<HolidayCalendar> {
    HolidayCalendar::load(cfg.holidays_file.as_deref())
}

/// The caller, from `--user` or `current_user`.
pub(crate) fn current_actor(pool: &DbPool, cfg: &Config) -> AppResult<Actor> {
    let username = cfg.current_user.as_deref().ok_or_else(|| {
        AppError::validation("no user selected: pass --user <username> or set current_user")
    })?;
    UserLogic::actor_for(&pool.conn, username)
}

/// Owner named by `--for`, or the caller.
pub(crate) fn target_owner(pool: &DbPool, actor: &Actor, for_user: Option<&str>) -> AppResult<i64> {
    match for_user {
        Some(name) => Ok(UserLogic::find(&pool.conn, name)?.id),
        None => Ok(actor.user_id),
    }
}

pub(crate) fn parse_location_filter(loc: Option<&str>) -> AppResult<Option<LocationKind>> {
    loc.map(LocationKind::parse).transpose()
}

pub(crate) fn report_outcome(outcome: &UpsertOutcome) {
    match outcome {
        UpsertOutcome::Saved(e) => success(format!(
            "Entry #{} saved: {} {}",
            e.id,
            e.date_str(),
            e.location.label()
        )),
        UpsertOutcome::Preserved(e) => warning(format!(
            "{} kept as public holiday (entry #{})",
            e.date_str(),
            e.id
        )),
        UpsertOutcome::HolidayWins {
            date,
            holiday,
            removed,
        } => {
            let mut msg = format!("{date} is a public holiday ({holiday}); nothing stored");
            if let Some(id) = removed {
                msg.push_str(&format!(", entry #{id} removed"));
            }
            warning(msg);
        }
    }
}
