use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::one_time::OneTimeLogic;
use crate::errors::AppResult;
use crate::models::{LocationKind, OneTimeDraft};
use crate::ui::messages::info;
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        to,
        loc,
        notes,
        for_user,
    } = cmd
    {
        let first = parse_date(date)?;
        let last = to.as_deref().map(parse_date).transpose()?;
        let location = LocationKind::parse(loc)?;

        let mut pool = super::open_pool(cfg)?;
        let holidays = super::load_holidays(cfg)?;
        let actor = super::current_actor(&pool, cfg)?;
        let owner_id = super::target_owner(&pool, &actor, for_user.as_deref())?;

        let mut draft = OneTimeDraft::new(owner_id, first, location);
        draft.notes = notes.clone();

        let logic = OneTimeLogic::new(&holidays, cfg.holiday_policy);

        match last {
            None => {
                let outcome = logic.upsert(&mut pool, &actor, &draft)?;
                super::report_outcome(&outcome);
            }
            Some(last) => {
                let report = logic.upsert_range(&mut pool, &actor, &draft, last)?;
                for outcome in &report.outcomes {
                    super::report_outcome(outcome);
                }
                info(format!(
                    "{} day(s) saved, {} skipped",
                    report.saved().len(),
                    report.skipped().len()
                ));
            }
        }
    }

    Ok(())
}
