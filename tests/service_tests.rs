use pontolog::config::Config;
use pontolog::core::approval::{ApprovalLogic, Decision};
use pontolog::core::bus::{DataChange, DataChangeBus};
use pontolog::core::clock::{ClockLogic, PunchRequest};
use pontolog::core::del::DeleteLogic;
use pontolog::core::employee::{EmployeeLogic, NewEmployee};
use pontolog::core::report::ReportLogic;
use pontolog::core::schedule::{ScheduleLogic, WeeklyShifts};
use pontolog::core::source::{EventQuery, EventSource};
use pontolog::db::initialize::init_db;
use pontolog::db::log::load_log;
use pontolog::db::migrate::{applied_versions, run_pending_migrations};
use pontolog::db::pool::DbPool;
use pontolog::errors::AppError;
use pontolog::models::event_kind::EventKind;
use pontolog::models::event_status::EventStatus;
use pontolog::models::location::Location;
use pontolog::models::profile::Role;
use pontolog::utils::time::parse_shift;
use std::sync::{Arc, Mutex};

mod common;
use common::ts;

fn setup() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");
    EmployeeLogic::bootstrap_admin(&pool, "boss", "boss@example.com", "Boss").expect("admin");
    EmployeeLogic::add(
        &pool,
        &DataChangeBus::new(),
        "boss",
        NewEmployee {
            id: "ana".into(),
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: Some("Lima".into()),
            role: Role::Employee,
        },
    )
    .expect("employee");
    pool
}

fn punch(pool: &DbPool, cfg: &Config, kind: EventKind, at: &str) -> Result<i64, AppError> {
    ClockLogic::punch(
        pool,
        &DataChangeBus::new(),
        cfg,
        PunchRequest {
            user_id: "ana".into(),
            kind,
            at: ts(at),
            location: None,
            photo_url: None,
        },
    )
    .map(|e| e.id)
}

#[test]
fn migrations_are_idempotent() {
    let pool = setup();
    assert_eq!(run_pending_migrations(&pool.conn).unwrap(), 0);
    assert_eq!(applied_versions(&pool.conn).unwrap().len(), 4);
}

#[test]
fn bootstrap_only_works_on_an_empty_database() {
    let pool = setup();
    let again = EmployeeLogic::bootstrap_admin(&pool, "other", "o@example.com", "O");
    assert!(matches!(again, Err(AppError::Forbidden(_))));
}

#[test]
fn punches_follow_the_allowed_transitions() {
    let pool = setup();
    let cfg = Config::default();

    assert!(matches!(
        punch(&pool, &cfg, EventKind::Saida, "2024-01-15 08:00"),
        Err(AppError::InvalidTransition(_))
    ));

    punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00").unwrap();
    punch(&pool, &cfg, EventKind::SaidaAlmoco, "2024-01-15 12:00").unwrap();
    assert!(matches!(
        punch(&pool, &cfg, EventKind::Saida, "2024-01-15 12:30"),
        Err(AppError::InvalidTransition(_))
    ));
    punch(&pool, &cfg, EventKind::VoltaAlmoco, "2024-01-15 13:00").unwrap();
    assert!(matches!(
        punch(&pool, &cfg, EventKind::SaidaAlmoco, "2024-01-15 14:00"),
        Err(AppError::InvalidTransition(_))
    ));
    punch(&pool, &cfg, EventKind::Saida, "2024-01-15 17:00").unwrap();

    let events = pool.fetch_events(&EventQuery::for_user("ana")).unwrap();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.status == EventStatus::Pendente));

    let report =
        ReportLogic::build(&pool, &EventQuery::for_user("ana"), &cfg.aggregate_options()).unwrap();
    assert_eq!(report.total_hours_label(), "8h 0m");
}

#[test]
fn punch_before_the_last_one_is_refused() {
    let pool = setup();
    let cfg = Config::default();
    punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00").unwrap();
    assert!(matches!(
        punch(&pool, &cfg, EventKind::Saida, "2024-01-15 07:00"),
        Err(AppError::InvalidTransition(_))
    ));
}

#[test]
fn unknown_employee_cannot_punch() {
    let pool = setup();
    let result = ClockLogic::punch(
        &pool,
        &DataChangeBus::new(),
        &Config::default(),
        PunchRequest {
            user_id: "ghost".into(),
            kind: EventKind::Entrada,
            at: ts("2024-01-15 08:00"),
            location: None,
            photo_url: None,
        },
    );
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn location_and_photo_can_be_required() {
    let pool = setup();
    let cfg = Config {
        require_location_and_photo: true,
        ..Config::default()
    };
    assert!(matches!(
        punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00"),
        Err(AppError::MissingData(_))
    ));

    let event = ClockLogic::punch(
        &pool,
        &DataChangeBus::new(),
        &cfg,
        PunchRequest {
            user_id: "ana".into(),
            kind: EventKind::Entrada,
            at: ts("2024-01-15 08:00"),
            location: Some(Location::new(-23.55, -46.63)),
            photo_url: Some("https://photos.example.com/1.jpg".into()),
        },
    )
    .unwrap();

    let stored = pool.fetch_events(&EventQuery::for_user("ana")).unwrap();
    assert_eq!(stored[0].id, event.id);
    assert_eq!(stored[0].location(), Some(Location::new(-23.55, -46.63)));
    assert_eq!(stored[0].photo_url.as_deref(), Some("https://photos.example.com/1.jpg"));
}

#[test]
fn punch_publishes_a_change() {
    let pool = setup();
    let mut bus = DataChangeBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe(move |c| sink.lock().unwrap().push(c.clone()));

    ClockLogic::punch(
        &pool,
        &bus,
        &Config::default(),
        PunchRequest {
            user_id: "ana".into(),
            kind: EventKind::Entrada,
            at: ts("2024-01-15 08:00"),
            location: None,
            photo_url: None,
        },
    )
    .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(matches!(&seen[0], DataChange::EventRecorded { user_id, .. } if user_id == "ana"));
}

#[test]
fn only_admins_decide_and_each_punch_once() {
    let pool = setup();
    let cfg = Config::default();
    let bus = DataChangeBus::new();
    let id = punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00").unwrap();

    assert!(matches!(
        ApprovalLogic::pending(&pool, "ana"),
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        ApprovalLogic::decide(&pool, &bus, "ana", id, Decision::Approve),
        Err(AppError::Forbidden(_))
    ));

    let pending = ApprovalLogic::pending(&pool, "boss").unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].employee_name, "Ana Lima");

    let decided = ApprovalLogic::decide(&pool, &bus, "boss", id, Decision::Approve).unwrap();
    assert_eq!(decided.status, EventStatus::Aprovado);
    assert_eq!(decided.approver_id.as_deref(), Some("boss"));
    assert!(decided.approved_at.is_some());

    assert!(ApprovalLogic::pending(&pool, "boss").unwrap().is_empty());
    assert!(matches!(
        ApprovalLogic::decide(&pool, &bus, "boss", id, Decision::Reject),
        Err(AppError::InvalidTransition(_))
    ));
    assert!(matches!(
        ApprovalLogic::decide(&pool, &bus, "boss", 999, Decision::Reject),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn rejected_punch_frees_the_transition() {
    let pool = setup();
    let cfg = Config::default();
    let id = punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00").unwrap();
    ApprovalLogic::decide(&pool, &DataChangeBus::new(), "boss", id, Decision::Reject).unwrap();

    punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:05").unwrap();
}

#[test]
fn schedule_is_replaced_as_a_whole() {
    let mut pool = setup();
    let bus = DataChangeBus::new();
    let shifts = WeeklyShifts {
        weekday: parse_shift("08:00-17:00").unwrap(),
        saturday: Some(parse_shift("08:00-12:00").unwrap()),
        sunday: None,
    };

    assert!(matches!(
        ScheduleLogic::set_weekly(&mut pool, &bus, "ana", "ana", shifts),
        Err(AppError::Forbidden(_))
    ));

    ScheduleLogic::set_weekly(&mut pool, &bus, "boss", "ana", shifts).unwrap();
    let loaded = ScheduleLogic::load(&pool, "ana", "ana").unwrap();
    assert_eq!(loaded.entries.len(), 6);
    assert_eq!(loaded.entry_for(6).map(|e| e.minutes()), Some(240));
    assert!(loaded.entry_for(0).is_none());

    let weekdays_only = WeeklyShifts {
        saturday: None,
        ..shifts
    };
    ScheduleLogic::set_weekly(&mut pool, &bus, "boss", "ana", weekdays_only).unwrap();
    assert_eq!(ScheduleLogic::load(&pool, "boss", "ana").unwrap().entries.len(), 5);
}

#[test]
fn employees_clear_only_their_own_history() {
    let pool = setup();
    let cfg = Config::default();
    let bus = DataChangeBus::new();
    punch(&pool, &cfg, EventKind::Entrada, "2024-01-15 08:00").unwrap();
    punch(&pool, &cfg, EventKind::Saida, "2024-01-15 12:00").unwrap();

    assert!(matches!(
        DeleteLogic::clear_history(&pool, &bus, "ana", "boss"),
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(DeleteLogic::clear_history(&pool, &bus, "ana", "ana").unwrap(), 2);
    assert!(pool.fetch_events(&EventQuery::for_user("ana")).unwrap().is_empty());
}

#[test]
fn mutations_leave_an_audit_trail() {
    let pool = setup();
    punch(&pool, &Config::default(), EventKind::Entrada, "2024-01-15 08:00").unwrap();

    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(ops.contains(&"migration_applied".to_string()));
    assert!(ops.contains(&"init".to_string()));
    assert!(ops.contains(&"employee_add".to_string()));
    assert!(ops.contains(&"clock".to_string()));
}

#[test]
fn admins_manage_profiles() {
    let pool = setup();
    let bus = DataChangeBus::new();

    assert!(matches!(EmployeeLogic::list(&pool, "ana"), Err(AppError::Forbidden(_))));
    assert_eq!(EmployeeLogic::list(&pool, "boss").unwrap().len(), 2);

    let promoted = EmployeeLogic::set_role(&pool, &bus, "boss", "ana", Role::Admin).unwrap();
    assert!(promoted.is_admin());

    let renamed =
        EmployeeLogic::rename(&pool, &bus, "boss", "ana", "Ana Maria", None).unwrap();
    assert_eq!(renamed.display_name(), "Ana Maria");

    assert!(matches!(
        EmployeeLogic::delete(&pool, &bus, "boss", "boss"),
        Err(AppError::Forbidden(_))
    ));
    EmployeeLogic::delete(&pool, &bus, "boss", "ana").unwrap();
    assert!(matches!(
        EmployeeLogic::delete(&pool, &bus, "boss", "ana"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn visible_scope_limits_employees_to_themselves() {
    let pool = setup();
    assert_eq!(
        EmployeeLogic::visible_scope(&pool, "ana", None).unwrap().as_deref(),
        Some("ana")
    );
    assert_eq!(EmployeeLogic::visible_scope(&pool, "boss", None).unwrap(), None);
    assert!(matches!(
        EmployeeLogic::visible_scope(&pool, "ana", Some("boss")),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn admins_still_see_punches_of_deleted_profiles() {
    let pool = setup();
    let cfg = Config::default();
    for (kind, at) in [
        (EventKind::Entrada, "2024-01-15 08:00"),
        (EventKind::Saida, "2024-01-15 12:00"),
    ] {
        punch(&pool, &cfg, kind, at).unwrap();
    }
    EmployeeLogic::delete(&pool, &DataChangeBus::new(), "boss", "ana").unwrap();

    let scope = EmployeeLogic::visible_scope(&pool, "boss", Some("ana")).unwrap();
    assert_eq!(scope.as_deref(), Some("ana"));

    let report =
        ReportLogic::build(&pool, &EventQuery::for_user("ana"), &Default::default()).unwrap();
    assert_eq!(report.total_minutes, 240);
}

#[test]
fn invalid_email_is_refused() {
    let pool = setup();
    let result = EmployeeLogic::add(
        &pool,
        &DataChangeBus::new(),
        "boss",
        NewEmployee {
            id: "x".into(),
            email: "not-an-email".into(),
            first_name: "X".into(),
            last_name: None,
            role: Role::Employee,
        },
    );
    assert!(matches!(result, Err(AppError::MissingData(_))));
}
