use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolve::{ResolveLogic, ViewMode, coverage_summary};
use crate::core::users::UserLogic;
use crate::errors::AppResult;
use crate::models::{ResolvedDayEntry, SYSTEM_OWNER};
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET, color_for_location};
use crate::utils::date::resolve_period;
use crate::utils::table::{Cell, Table};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        period,
        team,
        loc,
        for_user,
    } = cmd
    {
        let (start, end) = resolve_period(period.as_deref())?;
        let filter = super::parse_location_filter(loc.as_deref())?;

        let pool = super::open_pool(cfg)?;
        let holidays = super::load_holidays(cfg)?;
        let users = UserLogic::list(&pool.conn)?;

        let view = if *team {
            ViewMode::Team {
                owner_ids: users.iter().map(|u| u.id).collect(),
            }
        } else {
            let actor = super::current_actor(&pool, cfg)?;
            ViewMode::Personal {
                owner_id: super::target_owner(&pool, &actor, for_user.as_deref())?,
            }
        };

        let entries = ResolveLogic::resolve(&pool.conn, &holidays, &view, start, end, filter)?;
        if entries.is_empty() {
            info(format!("Nothing scheduled between {start} and {end}."));
            return Ok(());
        }

        let names: HashMap<i64, &str> = users
            .iter()
            .map(|u| (u.id, u.display_name.as_str()))
            .collect();

        print!("{}", render(&entries, &names, *team));

        if *team {
            println!();
            for (date, counts) in coverage_summary(&entries) {
                let parts: Vec<String> = counts
                    .iter()
                    .map(|(loc, n)| format!("{} {}", loc.code(), n))
                    .collect();
                println!("{GREY}{date}{RESET}  {}", parts.join(", "));
            }
        }
    }

    Ok(())
}

fn render(entries: &[ResolvedDayEntry], names: &HashMap<i64, &str>, team: bool) -> String {
    let mut headers = vec!["Date", "Day"];
    if team {
        headers.push("Member");
    }
    headers.extend(["Location", "Notes", "Source"]);

    let mut table = Table::new(headers);
    for e in entries {
        let mut row = vec![
            Cell::plain(e.date.format("%Y-%m-%d").to_string()),
            Cell::plain(e.date.format("%a").to_string()),
        ];
        if team {
            let member = if e.owner_id == SYSTEM_OWNER {
                "everyone".to_string()
            } else {
                names
                    .get(&e.owner_id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| e.owner_id.to_string())
            };
            row.push(Cell::plain(member));
        }
        row.push(Cell::colored(e.location.label(), color_for_location(e.location)));
        row.push(match e.notes.as_deref() {
            Some(n) => Cell::plain(n),
            None => Cell::colored("--", GREY),
        });

        let source = match e.source.id() {
            Some(id) => format!("{} #{}", e.source.kind_str(), id),
            None => e.source.kind_str().to_string(),
        };
        row.push(Cell::colored(source, GREY));

        table.add_row(row);
    }
    table.render()
}
