use crate::errors::{AppError, AppResult};
use crate::models::profile::{EmployeeProfile, Role};
use chrono::Local;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_PROFILES: &str =
    "SELECT id, first_name, last_name, email, role, avatar_url, updated_at FROM profiles";

fn map_profile(row: &Row) -> Result<EmployeeProfile> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(EmployeeProfile {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        role,
        avatar_url: row.get("avatar_url")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_profile(conn: &Connection, p: &EmployeeProfile) -> AppResult<()> {
    conn.execute(
        "INSERT INTO profiles (id, first_name, last_name, email, role, avatar_url, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.id,
            p.first_name,
            p.last_name,
            p.email,
            p.role.to_db_str(),
            p.avatar_url,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_profile(conn: &Connection, p: &EmployeeProfile) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE profiles
         SET first_name = ?1, last_name = ?2, email = ?3, role = ?4,
             avatar_url = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            p.first_name,
            p.last_name,
            p.email,
            p.role.to_db_str(),
            p.avatar_url,
            Local::now().to_rfc3339(),
            p.id,
        ],
    )?;
    Ok(n)
}

pub fn load_profile(conn: &Connection, id: &str) -> AppResult<Option<EmployeeProfile>> {
    let sql = format!("{SELECT_PROFILES} WHERE id = ?1");
    let p = conn.query_row(&sql, [id], map_profile).optional()?;
    Ok(p)
}

pub fn load_profiles(conn: &Connection) -> AppResult<Vec<EmployeeProfile>> {
    let sql = format!("{SELECT_PROFILES} ORDER BY first_name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_profile)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_profile(conn: &Connection, id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM profiles WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn count_profiles(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
    Ok(n)
}
