use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::{Config, LunchPolicyKind};
use crate::core::calculator::aggregate::{AggregateOptions, DayBoundary, StatusFilter};
use crate::core::calculator::expected::{day_balance, expected_for_range, expected_minutes};
use crate::core::employee::EmployeeLogic;
use crate::core::report::ReportLogic;
use crate::core::schedule::ScheduleLogic;
use crate::core::source::EventQuery;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::daily_summary::WorkReport;
use crate::models::schedule::WeeklySchedule;
use crate::ui::messages::{header, info};
use crate::utils::date::{self, DateBounds};
use crate::utils::formatting::{decimal_hours, format_hours_label, signed_balance};
use crate::utils::table::Table;

fn resolve_options(
    cfg: &Config,
    statuses: &Option<String>,
    lunch: &Option<String>,
    day_boundary: &Option<String>,
) -> AppResult<AggregateOptions> {
    let mut options = cfg.aggregate_options();

    if let Some(s) = statuses {
        options.status_filter =
            StatusFilter::parse(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?;
    }
    if let Some(l) = lunch {
        let kind = LunchPolicyKind::parse(l)
            .ok_or_else(|| AppError::Other(format!("unknown lunch policy '{l}'")))?;
        options.lunch_policy = cfg.lunch_policy_for(kind);
    }
    if let Some(b) = day_boundary {
        options.day_boundary = DayBoundary::parse(b)
            .ok_or_else(|| AppError::Other(format!("unknown day boundary '{b}'")))?;
    }
    Ok(options)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        period,
        employee,
        all,
        statuses,
        lunch,
        day_boundary,
    } = cmd
    {
        let actor = cfg.acting_user()?;
        let options = resolve_options(cfg, statuses, lunch, day_boundary)?;
        let bounds = date::period_or_current_month(period)?;
        let pool = open_db(cfg)?;

        if *all {
            EmployeeLogic::require_admin(&pool, actor)?;
            let query = EventQuery::default().within(bounds);
            let reports = ReportLogic::build_by_user(&pool, &query, &options)?;
            if reports.is_empty() {
                info("No worked time in the selected period.");
            }
            for (user, report) in &reports {
                print_report(&pool, actor, user, report, bounds)?;
            }
            return Ok(());
        }

        let user = employee.clone().unwrap_or_else(|| actor.to_string());
        EmployeeLogic::visible_scope(&pool, actor, Some(&user))?;

        let query = EventQuery::for_user(&user).within(bounds);
        let report = ReportLogic::build(&pool, &query, &options)?;
        print_report(&pool, actor, &user, &report, bounds)?;
    }
    Ok(())
}

fn print_report(
    pool: &DbPool,
    actor: &str,
    user: &str,
    report: &WorkReport,
    bounds: Option<DateBounds>,
) -> AppResult<()> {
    let schedule = match ScheduleLogic::load(pool, actor, user) {
        Ok(s) => s,
        Err(AppError::NotFound(_)) => WeeklySchedule::default(),
        Err(e) => return Err(e),
    };

    header(format!("Worked hours of {user}"));

    if report.is_empty() {
        info("No worked time in the selected period.");
        return Ok(());
    }

    let with_schedule = !schedule.is_empty();
    let mut headers = vec!["Date", "Worked", "Hours"];
    if with_schedule {
        headers.extend(["Expected", "Balance"]);
    }
    let mut table = Table::new(headers);

    for s in &report.daily_summaries {
        let mut row = vec![
            s.date.format("%Y-%m-%d").to_string(),
            s.total_hours_label.clone(),
            format!("{:.2}", decimal_hours(s.total_minutes)),
        ];
        if with_schedule {
            row.push(format_hours_label(expected_minutes(&schedule, s.date)));
            row.push(signed_balance(day_balance(report, &schedule, s.date)));
        }
        table.add_row(row);
    }
    print!("{}", table.render());

    println!(
        "Total: {} ({:.2} h) over {} day(s)",
        report.total_hours_label(),
        decimal_hours(report.total_minutes),
        report.daily_summaries.len()
    );

    if with_schedule && let Some(range) = bounds {
        let expected = expected_for_range(&schedule, range);
        println!(
            "Expected for the period: {} | Balance: {}",
            format_hours_label(expected),
            signed_balance(report.total_minutes - expected)
        );
    }
    println!();
    Ok(())
}
