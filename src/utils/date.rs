use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub type DateBounds = (NaiveDate, NaiveDate);

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Resolve a `--period` / `--range` expression into inclusive date bounds.
///
/// Supports:
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - ranges in the same format: YYYY:YYYY, YYYY-MM:YYYY-MM, YYYY-MM-DD:YYYY-MM-DD
/// - `all` → `None` (no date filtering)
pub fn parse_period(p: &str) -> AppResult<Option<DateBounds>> {
    let p = p.trim();

    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());

        if start.len() != end.len() {
            return Err(AppError::InvalidPeriod(format!(
                "start and end must have the same format: {p}"
            )));
        }

        let (from, _) = single_period(start)?;
        let (_, to) = single_period(end)?;

        if to < from {
            return Err(AppError::InvalidPeriod(format!("end before start: {p}")));
        }
        return Ok(Some((from, to)));
    }

    single_period(p).map(Some)
}

fn single_period(p: &str) -> AppResult<DateBounds> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let last = month_last_day(d1.year(), d1.month()).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(d1.year(), d1.month(), last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// First and last day of the current month.
pub fn current_month_bounds() -> DateBounds {
    let t = today();
    let first = t.with_day(1).unwrap_or(t);
    let last = month_last_day(t.year(), t.month())
        .and_then(|d| t.with_day(d))
        .unwrap_or(t);
    (first, last)
}

/// Resolve an optional period, defaulting to the current month.
pub fn period_or_current_month(period: &Option<String>) -> AppResult<Option<DateBounds>> {
    match period {
        Some(p) => parse_period(p),
        None => Ok(Some(current_month_bounds())),
    }
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        first.with_month(m + 1)
    };
    next?.pred_opt().map(|d| d.day())
}
