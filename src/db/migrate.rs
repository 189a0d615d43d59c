//! Versioned schema migrations. Each step runs once and is recorded in
//! `schema_migrations`.

use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_log",
        description: "internal audit log",
        sql: r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "0002_profiles",
        description: "employee profiles",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id          TEXT PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT,
            email       TEXT NOT NULL UNIQUE,
            role        TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('employee','admin')),
            avatar_url  TEXT,
            updated_at  TEXT
        );
        "#,
    },
    Migration {
        version: "0003_pontos",
        description: "clock events",
        sql: r#"
        CREATE TABLE IF NOT EXISTS pontos (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       TEXT NOT NULL,
            kind          TEXT NOT NULL
                          CHECK(kind IN ('entrada','saida','saida_almoco','volta_almoco')),
            requested_at  TEXT NOT NULL,
            status        TEXT NOT NULL DEFAULT 'pendente'
                          CHECK(status IN ('pendente','aprovado','rejeitado')),
            approved_at   TEXT,
            approver_id   TEXT,
            latitude      REAL,
            longitude     REAL,
            photo_url     TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pontos_user_time ON pontos(user_id, requested_at);
        CREATE INDEX IF NOT EXISTS idx_pontos_status ON pontos(status);
        "#,
    },
    Migration {
        version: "0004_expedientes",
        description: "weekly schedules",
        sql: r#"
        CREATE TABLE IF NOT EXISTS expedientes (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            day_of_week  INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            UNIQUE(user_id, day_of_week)
        );
        "#,
    },
];

fn ensure_migrations_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let found: Option<i32> = conn
        .query_row(
            "SELECT 1 FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Run every migration not applied yet. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_migrations_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;

        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![m.version, chrono::Local::now().to_rfc3339()],
        )?;

        audit(conn, "migration_applied", m.version, m.description)?;
        tracing::debug!(version = m.version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_migrations_table(conn)?;
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
