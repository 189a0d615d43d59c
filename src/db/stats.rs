use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour::{Cyan, Green, Yellow};
use rusqlite::OptionalExtension;
use std::fs;

pub struct DbStats {
    pub file_size: u64,
    pub events: i64,
    pub pending: i64,
    pub profiles: i64,
    pub first_day: Option<String>,
    pub last_day: Option<String>,
}

pub fn collect(pool: &DbPool, db_path: &str) -> AppResult<DbStats> {
    let conn = &pool.conn;
    let count = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    let first_day: Option<String> = conn
        .query_row(
            "SELECT substr(requested_at, 1, 10) FROM pontos ORDER BY requested_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last_day: Option<String> = conn
        .query_row(
            "SELECT substr(requested_at, 1, 10) FROM pontos ORDER BY requested_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbStats {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        events: count("SELECT COUNT(*) FROM pontos")?,
        pending: count("SELECT COUNT(*) FROM pontos WHERE status = 'pendente'")?,
        profiles: count("SELECT COUNT(*) FROM profiles")?,
        first_day,
        last_day,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let s = collect(pool, db_path)?;
    let file_mb = (s.file_size as f64) / (1024.0 * 1024.0);

    println!("{} {}", Cyan.paint("• File:"), Yellow.paint(db_path));
    println!("{} {:.2} MB", Cyan.paint("• Size:"), file_mb);
    println!("{} {}", Cyan.paint("• Clock events:"), Green.paint(s.events.to_string()));
    println!("{} {}", Cyan.paint("• Pending approval:"), s.pending);
    println!("{} {}", Cyan.paint("• Employees:"), s.profiles);
    println!("{}", Cyan.paint("• Date range:"));
    println!("    from: {}", s.first_day.as_deref().unwrap_or("--"));
    println!("    to:   {}", s.last_day.as_deref().unwrap_or("--"));
    Ok(())
}
