use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::db::users;
use crate::errors::AppResult;
use crate::models::Role;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, YELLOW};
use crate::utils::table::{Cell, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut pool = super::open_pool(cfg)?;

    match action {
        UserAction::Add {
            username,
            name,
            admin,
        } => {
            // the very first user is created without a caller
            let actor = match cfg.current_user.as_deref() {
                Some(name) => users::find_by_username(&pool.conn, name)?.map(|u| u.actor()),
                None => None,
            };
            let role = if *admin { Role::Admin } else { Role::User };
            let user = UserLogic::add(
                &mut pool,
                actor.as_ref(),
                username,
                name.as_deref().unwrap_or(""),
                role,
            )?;
            success(format!(
                "User #{} '{}' added ({})",
                user.id,
                user.username,
                user.role.to_db_str()
            ));
        }
        UserAction::Edit { username, name } => {
            let actor = super::current_actor(&pool, cfg)?;
            let target = UserLogic::find(&pool.conn, username)?;
            let user = UserLogic::update(&mut pool, &actor, target.id, name)?;
            success(format!(
                "User #{} '{}' is now shown as '{}'",
                user.id, user.username, user.display_name
            ));
        }
        UserAction::List => {
            let users = UserLogic::list(&pool.conn)?;
            if users.is_empty() {
                info("No users yet. Add one with `teamcal user add <username>`.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Username", "Name", "Role"]);
            for u in users {
                let role = match u.role {
                    Role::Admin => Cell::colored("admin", YELLOW),
                    Role::User => Cell::colored("user", GREY),
                };
                table.add_row(vec![
                    Cell::plain(u.id.to_string()),
                    Cell::plain(u.username),
                    Cell::plain(u.display_name),
                    role,
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
