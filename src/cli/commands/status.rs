use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::core::report::ReportLogic;
use crate::core::source::EventQuery;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::formatting::{bold, format_hours_label};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { date: date_arg } = cmd {
        let user = cfg.acting_user()?;
        let day = match date_arg {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let pool = open_db(cfg)?;
        let status = ClockLogic::status_on(&pool, user, day)?;
        let report = ReportLogic::build(
            &pool,
            &EventQuery::for_user(user).on_day(day),
            &cfg.aggregate_options(),
        )?;

        let next: Vec<&str> = status
            .allowed_actions()
            .iter()
            .map(|k| k.to_db_str())
            .collect();

        println!("{} {}", bold(user), day);
        println!("  Status      : {}", status.describe());
        println!(
            "  Last punch  : {}",
            status
                .last_action
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--".into())
        );
        println!("  Lunch taken : {}", if status.has_taken_lunch_today { "yes" } else { "no" });
        println!("  Worked      : {}", format_hours_label(report.minutes_for(day)));
        println!("  Next        : {}", next.join(", "));
    }
    Ok(())
}
