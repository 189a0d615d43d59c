use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ADMIN, add_employee, clock, clock_full_day, init_with_admin, pontolog, setup_test_db, temp_out};

#[test]
fn init_creates_schema_and_admin() {
    let db = setup_test_db("cli_init");
    init_with_admin(&db);

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("boss@example.com"))
        .stdout(contains("admin"));
}

#[test]
fn clock_flow_reports_todays_total() {
    let db = setup_test_db("cli_clock_flow");
    init_with_admin(&db);
    add_employee(&db, "ana");

    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();
    clock(&db, "ana", "saida_almoco", "2024-01-15 12:00")
        .success()
        .stdout(contains("4h 0m"));
    clock(&db, "ana", "volta_almoco", "2024-01-15 13:00").success();
    clock(&db, "ana", "saida", "2024-01-15 17:00")
        .success()
        .stdout(contains("Saída"))
        .stdout(contains("8h 0m"));

    pontolog()
        .args(["--db", &db, "--user", "ana", "status", "--date", "2024-01-15"])
        .assert()
        .success()
        .stdout(contains("clocked out"))
        .stdout(contains("entrada"));
}

#[test]
fn invalid_transition_fails() {
    let db = setup_test_db("cli_bad_transition");
    init_with_admin(&db);
    add_employee(&db, "ana");

    clock(&db, "ana", "saida", "2024-01-15 08:00")
        .failure()
        .stderr(contains("Punch refused"));

    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();
    clock(&db, "ana", "volta_almoco", "2024-01-15 09:00")
        .failure()
        .stderr(contains("volta_almoco"));
}

#[test]
fn unknown_kind_and_missing_user_fail() {
    let db = setup_test_db("cli_bad_kind");
    init_with_admin(&db);

    clock(&db, ADMIN, "pausa", "2024-01-15 08:00")
        .failure()
        .stderr(contains("Invalid event kind"));

    pontolog()
        .args(["--db", &db, "clock", "entrada"])
        .assert()
        .failure()
        .stderr(contains("No acting user"));
}

#[test]
fn report_sums_days_with_the_e2e_figure() {
    let db = setup_test_db("cli_report");
    init_with_admin(&db);
    add_employee(&db, "ana");

    clock_full_day(&db, "ana", "2024-01-15");
    clock(&db, "ana", "entrada", "2024-01-16 09:00").success();
    clock(&db, "ana", "saida", "2024-01-16 12:00").success();

    pontolog()
        .args([
            "--db", &db, "--user", "ana", "report", "--period", "2024-01",
        ])
        .assert()
        .success()
        .stdout(contains("2024-01-15"))
        .stdout(contains("8h 0m"))
        .stdout(contains("3h 0m"))
        .stdout(contains("11h 0m"));
}

#[test]
fn report_flat_lunch_and_approved_only() {
    let db = setup_test_db("cli_report_options");
    init_with_admin(&db);
    add_employee(&db, "ana");

    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();
    clock(&db, "ana", "saida", "2024-01-15 17:00").success();

    pontolog()
        .args([
            "--db", &db, "--user", "ana", "report", "--period", "2024-01-15", "--lunch", "flat",
        ])
        .assert()
        .success()
        .stdout(contains("8h 0m"));

    pontolog()
        .args([
            "--db", &db, "--user", "ana", "report", "--period", "2024-01-15", "--statuses",
            "approved",
        ])
        .assert()
        .success()
        .stdout(contains("No worked time"));
}

#[test]
fn employee_cannot_read_others_report() {
    let db = setup_test_db("cli_report_forbidden");
    init_with_admin(&db);
    add_employee(&db, "ana");
    add_employee(&db, "bia");

    pontolog()
        .args(["--db", &db, "--user", "ana", "report", "--employee", "bia"])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));

    pontolog()
        .args(["--db", &db, "--user", "ana", "report", "--all"])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));
}

#[test]
fn approval_flow() {
    let db = setup_test_db("cli_approval");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();

    pontolog()
        .args(["--db", &db, "--user", "ana", "pending"])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "pending"])
        .assert()
        .success()
        .stdout(contains("Entrada"))
        .stdout(contains("1 pending"));

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "approve", "1"])
        .assert()
        .success()
        .stdout(contains("aprovado"));

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "reject", "1"])
        .assert()
        .failure()
        .stderr(contains("already aprovado"));

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "approve", "42"])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    pontolog()
        .args([
            "--db", &db, "--user", "ana", "list", "--period", "2024-01", "--status", "aprovado",
        ])
        .assert()
        .success()
        .stdout(contains("2024-01-15"))
        .stdout(contains("1 event(s)"));
}

#[test]
fn schedule_set_and_show_with_balance() {
    let db = setup_test_db("cli_schedule");
    init_with_admin(&db);
    add_employee(&db, "ana");

    pontolog()
        .args([
            "--db", &db, "--user", "ana", "schedule", "--weekday", "08:00-16:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));

    pontolog()
        .args([
            "--db",
            &db,
            "--user",
            ADMIN,
            "schedule",
            "--employee",
            "ana",
            "--weekday",
            "08:00-16:00",
            "--saturday",
            "08:00-12:00",
        ])
        .assert()
        .success();

    pontolog()
        .args(["--db", &db, "--user", "ana", "schedule", "--show"])
        .assert()
        .success()
        .stdout(contains("Monday"))
        .stdout(contains("Saturday"))
        .stdout(contains("Sunday").not());

    // Monday 2024-01-15: 8h worked against 8h expected
    clock_full_day(&db, "ana", "2024-01-15");
    pontolog()
        .args([
            "--db", &db, "--user", "ana", "report", "--period", "2024-01-15",
        ])
        .assert()
        .success()
        .stdout(contains("Balance"))
        .stdout(contains("00h 00m"));
}

#[test]
fn bad_shift_is_rejected() {
    let db = setup_test_db("cli_bad_shift");
    init_with_admin(&db);

    pontolog()
        .args([
            "--db", &db, "--user", ADMIN, "schedule", "--weekday", "17:00-08:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn del_asks_for_confirmation() {
    let db = setup_test_db("cli_del");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();

    pontolog()
        .args(["--db", &db, "--user", "ana", "del"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    pontolog()
        .args(["--db", &db, "--user", "ana", "del"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("1 punch(es)"));

    pontolog()
        .args(["--db", &db, "--user", "ana", "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No events"));
}

#[test]
fn del_without_an_answer_cancels() {
    let db = setup_test_db("cli_del_eof");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();

    pontolog()
        .args(["--db", &db, "--user", "ana", "del"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    pontolog()
        .args(["--db", &db, "--user", "ana", "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("1 event(s)"));
}

#[test]
fn admin_reports_on_a_deleted_employee() {
    let db = setup_test_db("cli_report_deleted");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock_full_day(&db, "ana", "2024-01-15");

    pontolog()
        .args(["--db", &db, "--user", ADMIN, "employee", "del", "ana"])
        .assert()
        .success();

    pontolog()
        .args([
            "--db", &db, "--user", ADMIN, "report", "--employee", "ana", "--period", "2024-01",
        ])
        .assert()
        .success()
        .stdout(contains("8h 0m"));
}

#[test]
fn export_events_csv_and_report_json() {
    let db = setup_test_db("cli_export");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock_full_day(&db, "ana", "2024-01-15");

    let csv_path = temp_out("cli_export_events", "csv");
    pontolog()
        .args([
            "--db", &db, "--user", "ana", "export", "--format", "csv", "--file", &csv_path,
            "--range", "2024-01",
        ])
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_path).expect("csv written");
    assert!(csv.starts_with("id,employee,date,time,kind,status"));
    assert!(csv.contains("15/01/2024"));
    assert!(csv.contains("Volta Almoço"));
    assert_eq!(csv.lines().count(), 5);

    let json_path = temp_out("cli_export_report", "json");
    pontolog()
        .args([
            "--db", &db, "--user", "ana", "export", "--format", "json", "--file", &json_path,
            "--report",
        ])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("json written")).unwrap();
    assert_eq!(json[0]["date"], "2024-01-15");
    assert_eq!(json[0]["minutes"], 480);
    assert_eq!(json[0]["hours"], "8h 0m");
}

#[test]
fn export_refuses_relative_paths_and_empty_ranges() {
    let db = setup_test_db("cli_export_edges");
    init_with_admin(&db);

    pontolog()
        .args([
            "--db", &db, "--user", ADMIN, "export", "--file", "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("absolute"));

    let out = temp_out("cli_export_empty", "csv");
    pontolog()
        .args(["--db", &db, "--user", ADMIN, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No events found"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn log_print_lists_operations() {
    let db = setup_test_db("cli_log");
    init_with_admin(&db);
    add_employee(&db, "ana");
    clock(&db, "ana", "entrada", "2024-01-15 08:00").success();

    pontolog()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("employee_add"))
        .stdout(contains("clock"));
}

#[test]
fn db_info_and_check() {
    let db = setup_test_db("cli_db");
    init_with_admin(&db);

    pontolog()
        .args(["--db", &db, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Employees"))
        .stdout(contains("Integrity check passed"));
}
