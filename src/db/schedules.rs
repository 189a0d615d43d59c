use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ScheduleEntry, WeeklySchedule};
use chrono::NaiveTime;
use rusqlite::types::Type;
use rusqlite::{Connection, Result, Row, params};

fn parse_hms(col: usize, raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            col,
            Type::Text,
            Box::new(AppError::InvalidTime(raw.to_string())),
        )
    })
}

fn map_entry(row: &Row) -> Result<ScheduleEntry> {
    let start: String = row.get("start_time")?;
    let end: String = row.get("end_time")?;
    Ok(ScheduleEntry {
        user_id: row.get("user_id")?,
        day_of_week: row.get("day_of_week")?,
        start_time: parse_hms(2, &start)?,
        end_time: parse_hms(3, &end)?,
    })
}

pub fn load_schedule(conn: &Connection, user_id: &str) -> AppResult<WeeklySchedule> {
    let mut stmt = conn.prepare(
        "SELECT user_id, day_of_week, start_time, end_time
         FROM expedientes
         WHERE user_id = ?1
         ORDER BY day_of_week ASC",
    )?;
    let rows = stmt.query_map([user_id], map_entry)?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(WeeklySchedule { entries })
}

/// Replace every schedule row of the employee in one transaction.
pub fn replace_schedule(
    conn: &mut Connection,
    user_id: &str,
    entries: &[ScheduleEntry],
) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM expedientes WHERE user_id = ?1", [user_id])?;
    for e in entries {
        tx.execute(
            "INSERT INTO expedientes (user_id, day_of_week, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                e.day_of_week,
                e.start_time.format("%H:%M:%S").to_string(),
                e.end_time.format("%H:%M:%S").to_string(),
            ],
        )?;
    }
    tx.commit()?;
    Ok(())
}
