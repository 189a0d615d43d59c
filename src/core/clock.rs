use crate::config::Config;
use crate::core::bus::{DataChange, DataChangeBus};
use crate::core::calculator::clock_status::ClockStatus;
use crate::core::employee::EmployeeLogic;
use crate::core::source::EventQuery;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, load_events};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use crate::models::event_status::EventStatus;
use crate::models::location::Location;
use chrono::{NaiveDate, NaiveDateTime};

/// One punch as requested by an employee.
#[derive(Debug, Clone)]
pub struct PunchRequest {
    pub user_id: String,
    pub kind: EventKind,
    pub at: NaiveDateTime,
    pub location: Option<Location>,
    pub photo_url: Option<String>,
}

pub struct ClockLogic;

impl ClockLogic {
    /// Status of `user_id` on `day`. Rejected punches do not count.
    pub fn status_on(pool: &DbPool, user_id: &str, day: NaiveDate) -> AppResult<ClockStatus> {
        let events: Vec<ClockEvent> =
            load_events(&pool.conn, &EventQuery::for_user(user_id).on_day(day))?
                .into_iter()
                .filter(|e| e.status != EventStatus::Rejeitado)
                .collect();
        Ok(ClockStatus::from_events(&events))
    }

    /// Record a pending punch after checking it fits the day so far.
    pub fn punch(
        pool: &DbPool,
        bus: &DataChangeBus,
        cfg: &Config,
        req: PunchRequest,
    ) -> AppResult<ClockEvent> {
        EmployeeLogic::require_profile(pool, &req.user_id)?;

        if let Some(loc) = &req.location
            && !loc.is_valid()
        {
            return Err(AppError::MissingData(format!(
                "invalid coordinates {}, {}",
                loc.latitude, loc.longitude
            )));
        }

        if cfg.require_location_and_photo && (req.location.is_none() || req.photo_url.is_none()) {
            return Err(AppError::MissingData(
                "location and photo are required to clock".into(),
            ));
        }

        let status = Self::status_on(pool, &req.user_id, req.at.date())?;
        if let Some(last) = status.last_action
            && req.at < last
        {
            return Err(AppError::InvalidTransition(format!(
                "{} is earlier than the last punch of the day ({})",
                req.at.format("%H:%M:%S"),
                last.format("%H:%M:%S")
            )));
        }
        status.check(req.kind)?;

        let mut event = ClockEvent::new(&req.user_id, req.kind, req.at)
            .with_location(req.location)
            .with_photo(req.photo_url);
        event.id = insert_event(&pool.conn, &event)?;

        audit(
            &pool.conn,
            "clock",
            &req.user_id,
            &format!("{} at {} (id {})", event.kind, event.timestamp_str(), event.id),
        )?;
        tracing::debug!(id = event.id, kind = %event.kind, user = %event.user_id, "punch recorded");

        bus.publish(&DataChange::EventRecorded {
            user_id: event.user_id.clone(),
            date: event.date(),
        });

        Ok(event)
    }
}
