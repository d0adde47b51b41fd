use crate::core::one_time::ensure_owner;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::recurring;
use crate::errors::{AppError, AppResult};
use crate::models::{Actor, RecurringDraft, RecurringRule};
use rusqlite::{Connection, TransactionBehavior};

pub struct RecurringLogic;

impl RecurringLogic {
    /// Create a rule (`draft.id == None`) or overwrite an existing one.
    ///
    /// Rules are never expanded into stored rows, so a rule may freely cover
    /// holidays and days that already carry one-time entries.
    pub fn upsert(pool: &mut DbPool, actor: &Actor, draft: &RecurringDraft) -> AppResult<RecurringRule> {
        if draft.days.is_empty() {
            return Err(AppError::validation("a recurring rule needs at least one weekday"));
        }
        actor.ensure_can_act_for(draft.owner_id, "recurring rules")?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_owner(&tx, draft.owner_id)?;

        let (rule, op) = match draft.id {
            None => (recurring::insert(&tx, draft)?, "add"),
            Some(id) => {
                let current = recurring::get(&tx, id)?
                    .ok_or_else(|| AppError::not_found(format!("rule {id}")))?;
                // owner of a rule is fixed at creation
                actor.ensure_can_act_for(current.owner_id, &format!("rule {id}"))?;
                if current.owner_id != draft.owner_id {
                    return Err(AppError::validation(format!(
                        "rule {id} belongs to user {}",
                        current.owner_id
                    )));
                }
                let updated = recurring::update(&tx, id, draft)?
                    .ok_or_else(|| AppError::not_found(format!("rule {id}")))?;
                (updated, "edit")
            }
        };

        audit(
            &tx,
            op,
            &format!("rule:{}", rule.id),
            &format!("{} on {} for user {}", rule.location, rule.days, rule.owner_id),
        )?;
        tx.commit()?;

        Ok(rule)
    }

    pub fn delete(pool: &mut DbPool, actor: &Actor, id: i64) -> AppResult<bool> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rule = recurring::get(&tx, id)?.ok_or_else(|| AppError::not_found(format!("rule {id}")))?;
        actor.ensure_can_act_for(rule.owner_id, &format!("rule {id}"))?;

        let deleted = recurring::delete(&tx, id)?;
        audit(
            &tx,
            "del",
            &format!("rule:{id}"),
            &format!("{} on {} for user {}", rule.location, rule.days, rule.owner_id),
        )?;
        tx.commit()?;

        Ok(deleted)
    }

    pub fn list(conn: &Connection, owner_id: i64) -> AppResult<Vec<RecurringRule>> {
        recurring::list_by_owner(conn, owner_id)
    }
}
