use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::one_time::OneTimeLogic;
use crate::errors::{AppError, AppResult};
use crate::models::{LocationKind, OneTimePatch};
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        loc,
        notes,
    } = cmd
    {
        let patch = OneTimePatch {
            date: date.as_deref().map(parse_date).transpose()?,
            location: loc.as_deref().map(LocationKind::parse).transpose()?,
            notes: notes.clone(),
        };
        if patch.is_empty() {
            return Err(AppError::validation("nothing to change: pass --date, --loc or --notes"));
        }

        let mut pool = super::open_pool(cfg)?;
        let holidays = super::load_holidays(cfg)?;
        let actor = super::current_actor(&pool, cfg)?;

        let outcome = OneTimeLogic::new(&holidays, cfg.holiday_policy).update(
            &mut pool, &actor, *id, &patch,
        )?;
        super::report_outcome(&outcome);
    }

    Ok(())
}
