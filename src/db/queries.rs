use crate::core::source::{EventQuery, EventSource};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::{ClockEvent, TIMESTAMP_FORMAT};
use crate::models::event_kind::EventKind;
use crate::models::event_status::EventStatus;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const SELECT_PONTOS: &str = "SELECT id, user_id, kind, requested_at, status, approved_at,
            approver_id, latitude, longitude, photo_url, created_at
     FROM pontos";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn parse_ts(col: usize, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw.to_string())))
}

pub fn map_row(row: &Row) -> Result<ClockEvent> {
    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidEventKind(kind_str.clone())))?;

    let requested_raw: String = row.get("requested_at")?;
    let requested_at = parse_ts(3, &requested_raw)?;

    let status_str: String = row.get("status")?;
    let status = EventStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    let approved_at = match row.get::<_, Option<String>>("approved_at")? {
        Some(raw) => Some(parse_ts(5, &raw)?),
        None => None,
    };

    Ok(ClockEvent {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind,
        requested_at,
        status,
        approved_at,
        approver_id: row.get("approver_id")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        photo_url: row.get("photo_url")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a punch and return its new id.
pub fn insert_event(conn: &Connection, ev: &ClockEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO pontos (user_id, kind, requested_at, status, approved_at, approver_id,
                             latitude, longitude, photo_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.user_id,
            ev.kind.to_db_str(),
            ev.timestamp_str(),
            ev.status.to_db_str(),
            ev.approved_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            ev.approver_id,
            ev.latitude,
            ev.longitude,
            ev.photo_url,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Build the SELECT for an [`EventQuery`], ordered chronologically.
fn build_filtered_query(query: &EventQuery) -> (String, Vec<String>) {
    let mut sql = SELECT_PONTOS.to_string();
    let mut conditions = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(user) = &query.user_id {
        conditions.push("user_id = ?");
        values.push(user.clone());
    }

    if let Some((from, to)) = query.range {
        conditions.push("substr(requested_at, 1, 10) >= ?");
        conditions.push("substr(requested_at, 1, 10) <= ?");
        values.push(from.format("%Y-%m-%d").to_string());
        values.push(to.format("%Y-%m-%d").to_string());
    }

    if let Some(status) = query.status {
        conditions.push("status = ?");
        values.push(status.to_db_str().to_string());
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY requested_at ASC, id ASC");

    (sql, values)
}

pub fn load_events(conn: &Connection, query: &EventQuery) -> AppResult<Vec<ClockEvent>> {
    let (sql, values) = build_filtered_query(query);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<ClockEvent>> {
    let sql = format!("{SELECT_PONTOS} WHERE id = ?1");
    let ev = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(ev)
}

/// Record an approval decision on one punch.
pub fn set_event_status(
    conn: &Connection,
    id: i64,
    status: EventStatus,
    approved_at: NaiveDateTime,
    approver_id: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE pontos SET status = ?1, approved_at = ?2, approver_id = ?3 WHERE id = ?4",
        params![
            status.to_db_str(),
            approved_at.format(TIMESTAMP_FORMAT).to_string(),
            approver_id,
            id
        ],
    )?;
    Ok(n)
}

pub fn delete_events_for_user(conn: &Connection, user_id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM pontos WHERE user_id = ?1", [user_id])?;
    Ok(n)
}

impl EventSource for DbPool {
    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<ClockEvent>> {
        load_events(&self.conn, query).map_err(|e| {
            tracing::warn!(error = %e, ?query, "event fetch failed");
            match e {
                AppError::Db(db) => AppError::EventSource(db.to_string()),
                other => other,
            }
        })
    }
}
