use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// Reserved owner id for system-wide rows (public holidays in the team view).
pub const SYSTEM_OWNER: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: String,
}

impl User {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
        }
    }
}

/// The authenticated caller of a core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    pub fn user(user_id: i64) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: i64) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Owners act on their own data; admins act on anyone's.
    pub fn can_act_for(&self, owner_id: i64) -> bool {
        self.user_id == owner_id || self.is_admin()
    }

    pub fn ensure_can_act_for(&self, owner_id: i64, what: &str) -> AppResult<()> {
        if self.can_act_for(owner_id) {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "user {} cannot access {} owned by user {}",
                self.user_id, what, owner_id
            )))
        }
    }
}
