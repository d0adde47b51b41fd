use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::one_time;
use crate::db::one_time as store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = super::open_pool(cfg)?;
        let actor = super::current_actor(&pool, cfg)?;

        if !*yes {
            // refuse before asking when the entry is missing or foreign
            let entry = store::get(&pool.conn, *id)?
                .ok_or_else(|| AppError::not_found(format!("entry {id}")))?;
            actor.ensure_can_act_for(entry.owner_id, &format!("entry {id}"))?;

            let prompt = format!(
                "Delete entry #{id} ({} {})? This action is irreversible.",
                entry.date_str(),
                entry.location.label()
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        if one_time::delete(&mut pool, &actor, *id)? {
            success(format!("Entry #{id} has been deleted."));
        }
    }

    Ok(())
}
