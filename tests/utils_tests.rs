use chrono::{NaiveDate, NaiveTime};
use pontolog::errors::AppError;
use pontolog::models::event_kind::EventKind;
use pontolog::models::event_status::EventStatus;
use pontolog::utils::date::{month_last_day, parse_date, parse_period};
use pontolog::utils::format_hours_label;
use pontolog::utils::formatting::{bold, decimal_hours, signed_balance, truncate};
use pontolog::utils::table::Table;
use pontolog::utils::time::{parse_shift, parse_timestamp};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("date")
}

#[test]
fn hours_label_has_no_padding() {
    assert_eq!(format_hours_label(0), "0h 0m");
    assert_eq!(format_hours_label(5), "0h 5m");
    assert_eq!(format_hours_label(60), "1h 0m");
    assert_eq!(format_hours_label(485), "8h 5m");
    assert_eq!(format_hours_label(660), "11h 0m");
    assert_eq!(format_hours_label(1501), "25h 1m");
}

#[test]
fn hours_label_clamps_negative_minutes() {
    assert_eq!(format_hours_label(-30), "0h 0m");
}

#[test]
fn decimal_and_signed_helpers() {
    assert_eq!(decimal_hours(510), 8.5);
    assert_eq!(decimal_hours(20), 0.33);
    assert_eq!(signed_balance(75), "+01h 15m");
    assert_eq!(signed_balance(-30), "-00h 30m");
    assert_eq!(signed_balance(0), "00h 00m");
    assert_eq!(truncate("abcdefghij", 6), "abc...");
    assert_eq!(truncate("abc", 6), "abc");
}

#[test]
fn bold_wraps_text_in_ansi_style() {
    let out = bold("ana");
    assert!(out.starts_with("\x1b[1m"));
    assert!(out.contains("ana"));
    assert!(out.ends_with("\x1b[0m"));
}

#[test]
fn month_last_day_follows_the_calendar() {
    assert_eq!(month_last_day(2024, 2), Some(29));
    assert_eq!(month_last_day(2023, 2), Some(28));
    assert_eq!(month_last_day(1900, 2), Some(28));
    assert_eq!(month_last_day(2000, 2), Some(29));
    assert_eq!(month_last_day(2024, 4), Some(30));
    assert_eq!(month_last_day(2024, 12), Some(31));
    assert_eq!(month_last_day(2024, 13), None);
    assert_eq!(month_last_day(2024, 0), None);
}

#[test]
fn periods_expand_to_inclusive_bounds() {
    assert_eq!(parse_period("2024").unwrap(), Some((d(2024, 1, 1), d(2024, 12, 31))));
    assert_eq!(parse_period("2024-02").unwrap(), Some((d(2024, 2, 1), d(2024, 2, 29))));
    assert_eq!(
        parse_period("2024-01-15").unwrap(),
        Some((d(2024, 1, 15), d(2024, 1, 15)))
    );
    assert_eq!(
        parse_period("2023-11:2024-01").unwrap(),
        Some((d(2023, 11, 1), d(2024, 1, 31)))
    );
    assert_eq!(parse_period("all").unwrap(), None);
}

#[test]
fn bad_periods_are_rejected() {
    assert!(matches!(parse_period("2024-13"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(parse_period("2024:2024-01"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(parse_period("2024-02:2024-01"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(parse_period("yesterday"), Err(AppError::InvalidPeriod(_))));
    assert_eq!(parse_date("2024-02-30"), None);
}

#[test]
fn timestamps_accept_optional_seconds_and_t_separator() {
    let a = parse_timestamp("2024-01-15 08:00").unwrap();
    let b = parse_timestamp("2024-01-15T08:00:00").unwrap();
    assert_eq!(a, b);
    assert!(matches!(parse_timestamp("15/01/2024 08:00"), Err(AppError::InvalidTime(_))));
}

#[test]
fn shifts_require_end_after_start() {
    let s = parse_shift("08:00-17:30").unwrap();
    assert_eq!(s.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(s.end, NaiveTime::from_hms_opt(17, 30, 0).unwrap());

    assert!(parse_shift("17:00-08:00").is_err());
    assert!(parse_shift("08:00-08:00").is_err());
    assert!(parse_shift("8-17").is_err());
}

#[test]
fn event_kind_and_status_names() {
    assert_eq!(EventKind::parse("saída"), Some(EventKind::Saida));
    assert_eq!(EventKind::parse("lunch-out"), Some(EventKind::SaidaAlmoco));
    assert_eq!(EventKind::parse("pausa"), None);
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_db_str(kind.to_db_str()), Some(kind));
    }
    assert_eq!(EventKind::VoltaAlmoco.label(), "Volta Almoço");

    assert_eq!(EventStatus::from_db_str("approved"), Some(EventStatus::Aprovado));
    assert_eq!(EventStatus::default(), EventStatus::Pendente);
    assert!(EventStatus::Rejeitado.is_decided());
    assert!(!EventStatus::Pendente.is_decided());
}

#[test]
fn table_aligns_accented_cells() {
    let mut t = Table::new(vec!["Kind", "Time"]);
    t.add_row(vec!["Saída Almoço".into(), "12:00".into()]);
    t.add_row(vec!["Entrada".into(), "08:00".into()]);
    let out = t.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2], "Saída Almoço | 12:00");
    assert_eq!(lines[3], "Entrada      | 08:00");
}
