use crate::core::bus::{DataChange, DataChangeBus};
use crate::core::employee::EmployeeLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::schedules::{load_schedule, replace_schedule};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{SATURDAY, SUNDAY, ScheduleEntry, Shift, WeeklySchedule};

/// Requested weekly hours: Monday to Friday share one shift.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyShifts {
    pub weekday: Shift,
    pub saturday: Option<Shift>,
    pub sunday: Option<Shift>,
}

impl WeeklyShifts {
    pub fn entries(&self, user_id: &str) -> Vec<ScheduleEntry> {
        let entry = |day_of_week: u32, shift: Shift| ScheduleEntry {
            user_id: user_id.to_string(),
            day_of_week,
            start_time: shift.start,
            end_time: shift.end,
        };

        let mut out: Vec<ScheduleEntry> = Vec::new();
        if let Some(s) = self.sunday {
            out.push(entry(SUNDAY, s));
        }
        out.extend((1..=5).map(|d| entry(d, self.weekday)));
        if let Some(s) = self.saturday {
            out.push(entry(SATURDAY, s));
        }
        out
    }
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn set_weekly(
        pool: &mut DbPool,
        bus: &DataChangeBus,
        actor: &str,
        user_id: &str,
        shifts: WeeklyShifts,
    ) -> AppResult<WeeklySchedule> {
        EmployeeLogic::require_admin(pool, actor)?;
        EmployeeLogic::require_profile(pool, user_id)?;

        let entries = shifts.entries(user_id);
        if let Some(bad) = entries.iter().find(|e| e.start_time >= e.end_time) {
            return Err(AppError::InvalidTime(format!(
                "start {} must be before end {}",
                bad.start_time.format("%H:%M"),
                bad.end_time.format("%H:%M")
            )));
        }

        replace_schedule(&mut pool.conn, user_id, &entries)?;
        audit(
            &pool.conn,
            "schedule",
            user_id,
            &format!("{} day(s) set by {actor}", entries.len()),
        )?;
        bus.publish(&DataChange::ScheduleChanged {
            user_id: user_id.to_string(),
        });

        Ok(WeeklySchedule { entries })
    }

    /// Employees see their own schedule; administrators see anyone's.
    pub fn load(pool: &DbPool, actor: &str, user_id: &str) -> AppResult<WeeklySchedule> {
        if actor != user_id {
            EmployeeLogic::require_admin(pool, actor)?;
        }
        EmployeeLogic::require_profile(pool, user_id)?;
        load_schedule(&pool.conn, user_id)
    }
}
