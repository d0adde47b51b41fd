use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::one_time;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{GREY, color_for_location};
use crate::utils::date::parse_period;
use crate::utils::table::{Cell, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, for_user } = cmd {
        let pool = super::open_pool(cfg)?;
        let actor = super::current_actor(&pool, cfg)?;
        let owner_id = super::target_owner(&pool, &actor, for_user.as_deref())?;
        let range = period.as_deref().map(parse_period).transpose()?;

        let entries = one_time::list(&pool.conn, &actor, owner_id, range)?;
        if entries.is_empty() {
            info("No stored entries.");
            return Ok(());
        }

        let mut table = Table::new(["ID", "Date", "Day", "Location", "Notes"]);
        for e in entries {
            let notes = match e.notes.clone() {
                Some(n) => Cell::plain(n),
                None => Cell::colored("--", GREY),
            };
            table.add_row(vec![
                Cell::plain(e.id.to_string()),
                Cell::plain(e.date_str()),
                Cell::plain(e.date.format("%a").to_string()),
                Cell::colored(e.location.label(), color_for_location(e.location)),
                notes,
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
