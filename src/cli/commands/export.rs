use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolve::ViewMode;
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;
use crate::utils::date::resolve_period;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        team,
        loc,
        force,
    } = cmd
    {
        let (start, end) = resolve_period(period.as_deref())?;
        let filter = super::parse_location_filter(loc.as_deref())?;

        let pool = super::open_pool(cfg)?;
        let holidays = super::load_holidays(cfg)?;

        let view = if *team {
            ViewMode::Team {
                owner_ids: UserLogic::list(&pool.conn)?.iter().map(|u| u.id).collect(),
            }
        } else {
            let actor = super::current_actor(&pool, cfg)?;
            ViewMode::Personal {
                owner_id: actor.user_id,
            }
        };

        let req = ExportRequest {
            view: &view,
            start,
            end,
            filter,
        };
        ExportLogic::export(&pool, &holidays, &req, *format, file, *force)?;
    }

    Ok(())
}
