#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use pontolog::models::clock_event::{ClockEvent, TIMESTAMP_FORMAT};
use pontolog::models::event_kind::EventKind;
use pontolog::models::event_status::EventStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN: &str = "boss";

/// Binary under test, isolated from the real `~/.pontolog`.
pub fn pontolog() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("pontolog_test_home");
    let mut cmd = cargo_bin_cmd!("pontolog");
    cmd.env("PONTOLOG_HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pontolog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database with the `boss` administrator.
pub fn init_with_admin(db_path: &str) {
    pontolog()
        .args([
            "--db",
            db_path,
            "--test",
            "init",
            "--admin",
            ADMIN,
            "--email",
            "boss@example.com",
            "--name",
            "Boss",
        ])
        .assert()
        .success();
}

pub fn add_employee(db_path: &str, id: &str) {
    pontolog()
        .args([
            "--db",
            db_path,
            "--user",
            ADMIN,
            "employee",
            "add",
            id,
            "--email",
            &format!("{id}@example.com"),
            "--first-name",
            id,
        ])
        .assert()
        .success();
}

/// `clock` as `user` at a fixed time.
pub fn clock(db_path: &str, user: &str, kind: &str, at: &str) -> assert_cmd::assert::Assert {
    pontolog()
        .args(["--db", db_path, "--user", user, "clock", kind, "--at", at])
        .assert()
}

/// A full explicit-lunch day: 08:00-12:00 and 13:00-17:00.
pub fn clock_full_day(db_path: &str, user: &str, day: &str) {
    for (kind, time) in [
        ("entrada", "08:00"),
        ("saida_almoco", "12:00"),
        ("volta_almoco", "13:00"),
        ("saida", "17:00"),
    ] {
        clock(db_path, user, kind, &format!("{day} {time}")).success();
    }
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{s}:00"), TIMESTAMP_FORMAT).expect("timestamp")
}

/// In-memory punch for library tests. `at` is `YYYY-MM-DD HH:MM`.
pub fn ev(id: i64, user: &str, kind: EventKind, at: &str) -> ClockEvent {
    let mut e = ClockEvent::new(user, kind, ts(at));
    e.id = id;
    e
}

pub fn ev_with_status(
    id: i64,
    user: &str,
    kind: EventKind,
    at: &str,
    status: EventStatus,
) -> ClockEvent {
    let mut e = ev(id, user, kind, at);
    e.status = status;
    e
}
