use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::one_time::OneTimeLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{parse_period, resolve_period, today, year_ahead};
use crate::utils::table::{Cell, Table};

/// `holidays`: read-only lookup in the configured table.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holidays { period } = cmd {
        let (start, end) = resolve_period(period.as_deref())?;
        let calendar = super::load_holidays(cfg)?;

        let found = calendar.holidays_in_range(start, end);
        if found.is_empty() {
            info(format!(
                "No {} public holidays between {start} and {end}.",
                calendar.jurisdiction()
            ));
            return Ok(());
        }

        header(format!("{} public holidays", calendar.jurisdiction()));
        let mut table = Table::new(["Date", "Day", "Holiday"]);
        for h in found {
            table.add_row(vec![
                Cell::plain(h.date.format("%Y-%m-%d").to_string()),
                Cell::plain(h.date.format("%a").to_string()),
                Cell::plain(h.name.clone()),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}

/// `refresh-holidays`: store the table's holidays as explicit entries,
/// by default for the twelve months starting today.
pub fn handle_refresh(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::RefreshHolidays { period, for_user } = cmd {
        let (start, end) = match period.as_deref() {
            Some(p) => parse_period(p)?,
            None => year_ahead(today()),
        };

        let mut pool = super::open_pool(cfg)?;
        let calendar = super::load_holidays(cfg)?;
        let actor = super::current_actor(&pool, cfg)?;
        let owner_id = super::target_owner(&pool, &actor, for_user.as_deref())?;

        let stored = OneTimeLogic::new(&calendar, cfg.holiday_policy)
            .refresh_holidays(&mut pool, &actor, owner_id, start, end)?;
        success(format!("{stored} public holiday(s) stored between {start} and {end}."));
    }

    Ok(())
}
