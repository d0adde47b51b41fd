use crate::cli::parser::{Commands, RuleAction};
use crate::config::Config;
use crate::core::recurring::RecurringLogic;
use crate::db::recurring;
use crate::errors::{AppError, AppResult};
use crate::models::{DaySet, LocationKind, RecurringDraft};
use crate::ui::messages::{info, success};
use crate::utils::colors::color_for_location;
use crate::utils::table::{Cell, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Rule { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;
    let actor = super::current_actor(&pool, cfg)?;

    match action {
        RuleAction::Add {
            loc,
            days,
            notes,
            for_user,
        } => {
            let owner_id = super::target_owner(&pool, &actor, for_user.as_deref())?;
            let mut draft = RecurringDraft::new(owner_id, LocationKind::parse(loc)?, DaySet::parse(days)?);
            draft.notes = notes.clone();

            let rule = RecurringLogic::upsert(&mut pool, &actor, &draft)?;
            success(format!("Rule #{} saved: {} on {}", rule.id, rule.location.label(), rule.days));
        }
        RuleAction::Edit {
            id,
            loc,
            days,
            notes,
        } => {
            let current = recurring::get(&pool.conn, *id)?
                .ok_or_else(|| AppError::not_found(format!("rule {id}")))?;

            let draft = RecurringDraft {
                id: Some(current.id),
                owner_id: current.owner_id,
                location: match loc {
                    Some(l) => LocationKind::parse(l)?,
                    None => current.location,
                },
                days: match days {
                    Some(d) => DaySet::parse(d)?,
                    None => current.days,
                },
                notes: notes.clone().or(current.notes),
            };

            let rule = RecurringLogic::upsert(&mut pool, &actor, &draft)?;
            success(format!("Rule #{} updated: {} on {}", rule.id, rule.location.label(), rule.days));
        }
        RuleAction::Del { id } => {
            if RecurringLogic::delete(&mut pool, &actor, *id)? {
                success(format!("Rule #{id} has been deleted."));
            }
        }
        RuleAction::List { for_user } => {
            let owner_id = super::target_owner(&pool, &actor, for_user.as_deref())?;
            let rules = RecurringLogic::list(&pool.conn, owner_id)?;
            if rules.is_empty() {
                info("No recurring rules.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Days", "Location", "Notes"]);
            for r in rules {
                table.add_row(vec![
                    Cell::plain(r.id.to_string()),
                    Cell::plain(r.days.to_string()),
                    Cell::colored(r.location.label(), color_for_location(r.location)),
                    Cell::plain(r.notes.unwrap_or_default()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
