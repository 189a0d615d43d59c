//! Time utilities: parsing HH:MM, punch timestamps and shift ranges.

use crate::errors::{AppError, AppResult};
use crate::models::clock_event::TIMESTAMP_FORMAT;
use crate::models::schedule::Shift;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t.trim(), "%H:%M:%S"))
        .ok()
}

/// Parse `YYYY-MM-DD HH:MM[:SS]` (a `T` separator is accepted too).
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let normalized = s.trim().replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Punch time: the given timestamp or the current local wall clock,
/// truncated to whole seconds.
pub fn resolve_timestamp(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_timestamp(s),
        None => {
            let now = Local::now().naive_local();
            Ok(now.with_nanosecond(0).unwrap_or(now))
        }
    }
}

/// Parse a shift written as `HH:MM-HH:MM`. The end must follow the start.
pub fn parse_shift(s: &str) -> AppResult<Shift> {
    let re = Regex::new(r"^\s*([01]\d|2[0-3]):([0-5]\d)\s*-\s*([01]\d|2[0-3]):([0-5]\d)\s*$")
        .map_err(|e| AppError::Other(e.to_string()))?;

    let caps = re
        .captures(s)
        .ok_or_else(|| AppError::InvalidTime(format!("expected HH:MM-HH:MM, got '{s}'")))?;

    let hm = |h: usize, m: usize| -> AppResult<NaiveTime> {
        let hours: u32 = caps[h]
            .parse()
            .map_err(|_| AppError::InvalidTime(s.to_string()))?;
        let minutes: u32 = caps[m]
            .parse()
            .map_err(|_| AppError::InvalidTime(s.to_string()))?;
        NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| AppError::InvalidTime(s.to_string()))
    };

    let start = hm(1, 2)?;
    let end = hm(3, 4)?;

    if end <= start {
        return Err(AppError::InvalidTime(format!(
            "shift end must be after start: '{s}'"
        )));
    }

    Ok(Shift { start, end })
}
