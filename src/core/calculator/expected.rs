use crate::models::daily_summary::WorkReport;
use crate::models::schedule::WeeklySchedule;
use crate::utils::date::DateBounds;
use chrono::NaiveDate;

/// Minutes the schedule expects on `date` (0 on days without an entry).
pub fn expected_minutes(schedule: &WeeklySchedule, date: NaiveDate) -> i64 {
    schedule
        .entry_for_date(date)
        .map(|e| e.minutes())
        .unwrap_or(0)
}

/// Worked minus expected for a single day.
pub fn day_balance(report: &WorkReport, schedule: &WeeklySchedule, date: NaiveDate) -> i64 {
    report.minutes_for(date) - expected_minutes(schedule, date)
}

/// Expected minutes summed over every day in `bounds`.
pub fn expected_for_range(schedule: &WeeklySchedule, bounds: DateBounds) -> i64 {
    let (from, to) = bounds;
    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|d| expected_minutes(schedule, d))
        .sum()
}
