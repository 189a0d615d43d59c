use crate::core::bus::{DataChange, DataChangeBus};
use crate::core::employee::EmployeeLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::delete_events_for_user;
use crate::errors::AppResult;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete every punch of `user_id`. Returns how many rows went away.
    pub fn clear_history(
        pool: &DbPool,
        bus: &DataChangeBus,
        actor: &str,
        user_id: &str,
    ) -> AppResult<usize> {
        if actor != user_id {
            EmployeeLogic::require_admin(pool, actor)?;
        } else {
            EmployeeLogic::require_profile(pool, actor)?;
        }

        let removed = delete_events_for_user(&pool.conn, user_id)?;
        audit(
            &pool.conn,
            "del",
            user_id,
            &format!("{removed} event(s) cleared by {actor}"),
        )?;
        bus.publish(&DataChange::HistoryCleared {
            user_id: user_id.to_string(),
        });

        Ok(removed)
    }
}
