use crate::core::bus::{DataChange, DataChangeBus};
use crate::core::employee::EmployeeLogic;
use crate::core::source::EventQuery;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::profiles::load_profiles;
use crate::db::queries::{load_event, load_events, set_event_status};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_status::EventStatus;
use crate::utils::time::resolve_timestamp;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(self) -> EventStatus {
        match self {
            Decision::Approve => EventStatus::Aprovado,
            Decision::Reject => EventStatus::Rejeitado,
        }
    }
}

/// A pending punch with the display name of its employee.
#[derive(Debug, Clone)]
pub struct PendingEvent {
    pub event: ClockEvent,
    pub employee_name: String,
}

pub struct ApprovalLogic;

impl ApprovalLogic {
    /// Pending punches, oldest first.
    pub fn pending(pool: &DbPool, actor: &str) -> AppResult<Vec<PendingEvent>> {
        EmployeeLogic::require_admin(pool, actor)?;

        let names: HashMap<String, String> = load_profiles(&pool.conn)?
            .into_iter()
            .map(|p| (p.id.clone(), p.display_name()))
            .collect();

        let query = EventQuery::default().with_status(Some(EventStatus::Pendente));
        let pending = load_events(&pool.conn, &query)?
            .into_iter()
            .map(|event| PendingEvent {
                employee_name: names
                    .get(&event.user_id)
                    .cloned()
                    .unwrap_or_else(|| event.user_id.clone()),
                event,
            })
            .collect();
        Ok(pending)
    }

    pub fn decide(
        pool: &DbPool,
        bus: &DataChangeBus,
        actor: &str,
        event_id: i64,
        decision: Decision,
    ) -> AppResult<ClockEvent> {
        EmployeeLogic::require_admin(pool, actor)?;

        let mut event = load_event(&pool.conn, event_id)?
            .ok_or_else(|| AppError::NotFound(format!("event {event_id}")))?;
        if event.status.is_decided() {
            return Err(AppError::InvalidTransition(format!(
                "event {event_id} is already {}",
                event.status
            )));
        }

        let now = resolve_timestamp(None)?;
        let status = decision.status();
        set_event_status(&pool.conn, event_id, status, now, actor)?;

        event.status = status;
        event.approved_at = Some(now);
        event.approver_id = Some(actor.to_string());

        audit(
            &pool.conn,
            "decide",
            &event.user_id,
            &format!("event {event_id} {status} by {actor}"),
        )?;
        bus.publish(&DataChange::EventDecided {
            event_id,
            user_id: event.user_id.clone(),
            status,
        });

        Ok(event)
    }
}
