use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

pub const SUNDAY: u32 = 0;
pub const SATURDAY: u32 = 6;

/// ⇔ expedientes row. `day_of_week`: 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub user_id: String,
    pub day_of_week: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleEntry {
    pub fn minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }
}

/// Start/end pair used when editing a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklySchedule {
    pub entries: Vec<ScheduleEntry>,
}

impl WeeklySchedule {
    pub fn entry_for(&self, day_of_week: u32) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.day_of_week == day_of_week)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.entry_for(date.weekday().num_days_from_sunday())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn weekday_name(day_of_week: u32) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}
