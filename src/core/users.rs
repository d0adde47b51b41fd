use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::{Actor, Role, User};
use rusqlite::{Connection, TransactionBehavior};

pub struct UserLogic;

impl UserLogic {
    /// Register a team member.
    ///
    /// The very first user needs no actor and always becomes an admin.
    /// After that only admins may add users.
    pub fn add(
        pool: &mut DbPool,
        actor: Option<&Actor>,
        username: &str,
        display_name: &str,
        role: Role,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("username cannot be empty"));
        }
        let display_name = match display_name.trim() {
            "" => username,
            name => name,
        };

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let role = if users::count(&tx)? == 0 {
            Role::Admin
        } else {
            match actor {
                Some(a) if a.is_admin() => role,
                Some(a) => {
                    return Err(AppError::unauthorized(format!(
                        "user {} is not an admin",
                        a.user_id
                    )));
                }
                None => return Err(AppError::unauthorized("adding users requires an admin")),
            }
        };

        if users::find_by_username(&tx, username)?.is_some() {
            return Err(AppError::validation(format!("username '{username}' already exists")));
        }

        let user = users::insert(&tx, username, display_name, role)?;
        audit(
            &tx,
            "user_add",
            &format!("user:{}", user.id),
            &format!("{} ({})", user.username, user.role.to_db_str()),
        )?;
        tx.commit()?;

        Ok(user)
    }

    /// Change a member's display name. Users edit their own profile,
    /// admins anyone's.
    pub fn update(
        pool: &mut DbPool,
        actor: &Actor,
        user_id: i64,
        display_name: &str,
    ) -> AppResult<User> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::validation("display name cannot be empty"));
        }

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let before = users::get(&tx, user_id)?
            .ok_or_else(|| AppError::not_found(format!("user {user_id}")))?;
        actor.ensure_can_act_for(user_id, "profile")?;

        let user = users::update_display_name(&tx, user_id, display_name)?
            .ok_or_else(|| AppError::not_found(format!("user {user_id}")))?;
        audit(
            &tx,
            "user_edit",
            &format!("user:{user_id}"),
            &format!("{}: '{}' -> '{}'", user.username, before.display_name, user.display_name),
        )?;
        tx.commit()?;

        Ok(user)
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<User>> {
        users::list(conn)
    }

    pub fn find(conn: &Connection, username: &str) -> AppResult<User> {
        users::find_by_username(conn, username)?
            .ok_or_else(|| AppError::not_found(format!("user '{username}'")))
    }

    pub fn actor_for(conn: &Connection, username: &str) -> AppResult<Actor> {
        Ok(Self::find(conn, username)?.actor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::open_db_in_memory;

    #[test]
    fn first_user_becomes_admin() {
        let mut pool = open_db_in_memory().unwrap();
        let u = UserLogic::add(&mut pool, None, "sarah", "Sarah", Role::User).unwrap();
        assert_eq!(u.role, Role::Admin);
    }

    #[test]
    fn later_users_need_an_admin() {
        let mut pool = open_db_in_memory().unwrap();
        let admin = UserLogic::add(&mut pool, None, "sarah", "Sarah", Role::User).unwrap();
        let bob = UserLogic::add(&mut pool, Some(&admin.actor()), "bob", "", Role::User).unwrap();
        assert_eq!(bob.display_name, "bob");

        let err = UserLogic::add(&mut pool, Some(&bob.actor()), "eve", "Eve", Role::User).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
        let err = UserLogic::add(&mut pool, None, "eve", "Eve", Role::User).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut pool = open_db_in_memory().unwrap();
        let admin = UserLogic::add(&mut pool, None, "sarah", "Sarah", Role::User).unwrap();
        let err =
            UserLogic::add(&mut pool, Some(&admin.actor()), "sarah", "Other", Role::User).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn profile_edits_by_self_or_admin() {
        let mut pool = open_db_in_memory().unwrap();
        let admin = UserLogic::add(&mut pool, None, "sarah", "Sarah", Role::User).unwrap();
        let bob = UserLogic::add(&mut pool, Some(&admin.actor()), "bob", "Bob", Role::User).unwrap();
        let eve = UserLogic::add(&mut pool, Some(&admin.actor()), "eve", "Eve", Role::User).unwrap();

        let edited = UserLogic::update(&mut pool, &bob.actor(), bob.id, " Robert ").unwrap();
        assert_eq!(edited.display_name, "Robert");
        assert_eq!(edited.username, "bob");

        let edited = UserLogic::update(&mut pool, &admin.actor(), bob.id, "Bobby").unwrap();
        assert_eq!(edited.display_name, "Bobby");

        let err = UserLogic::update(&mut pool, &eve.actor(), bob.id, "Hacked").unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
        let err = UserLogic::update(&mut pool, &bob.actor(), bob.id, "  ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = UserLogic::update(&mut pool, &admin.actor(), 42, "Ghost").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert_eq!(UserLogic::find(&pool.conn, "bob").unwrap().display_name, "Bobby");
    }

    #[test]
    fn unknown_username_is_not_found() {
        let pool = open_db_in_memory().unwrap();
        let err = UserLogic::actor_for(&pool.conn, "ghost").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
