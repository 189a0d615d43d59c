use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::core::source::{EventQuery, EventSource};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_status::EventStatus;
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        employee,
        status,
    } = cmd
    {
        let actor = cfg.acting_user()?;
        let pool = open_db(cfg)?;

        let status = match status {
            Some(s) => Some(
                EventStatus::from_db_str(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
            ),
            None => None,
        };

        let query = EventQuery {
            user_id: EmployeeLogic::visible_scope(&pool, actor, employee.as_deref())?,
            range: date::period_or_current_month(period)?,
            status,
        };
        let events = pool.fetch_events(&query)?;

        if events.is_empty() {
            println!("No events for the selected period.");
            return Ok(());
        }

        print_events(&events);
    }
    Ok(())
}

fn print_events(events: &[ClockEvent]) {
    let mut table = Table::new(vec![
        "ID", "Employee", "Date", "Time", "Kind", "Status", "Location", "Photo",
    ]);
    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.user_id.clone(),
            ev.date_str(),
            ev.time_str(),
            ev.kind.label().to_string(),
            ev.status.to_string(),
            ev.location()
                .map(|l| format!("{:.5}, {:.5}", l.latitude, l.longitude))
                .unwrap_or_else(|| "-".into()),
            (if ev.photo_url.is_some() { "yes" } else { "-" }).to_string(),
        ]);
    }
    print!("{}", table.render());
    println!("{} event(s)", events.len());
}
