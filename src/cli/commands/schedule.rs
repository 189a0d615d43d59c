use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bus::DataChangeBus;
use crate::core::schedule::{ScheduleLogic, WeeklyShifts};
use crate::errors::AppResult;
use crate::models::schedule::{WeeklySchedule, weekday_name};
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_hours_label;
use crate::utils::table::Table;
use crate::utils::time::parse_shift;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule {
        employee,
        show,
        weekday,
        saturday,
        sunday,
    } = cmd
    {
        let actor = cfg.acting_user()?;
        let user = employee.as_deref().unwrap_or(actor);
        let mut pool = open_db(cfg)?;

        if let Some(weekday) = weekday {
            let shifts = WeeklyShifts {
                weekday: parse_shift(weekday)?,
                saturday: saturday.as_deref().map(parse_shift).transpose()?,
                sunday: sunday.as_deref().map(parse_shift).transpose()?,
            };
            let bus = DataChangeBus::new();
            let schedule = ScheduleLogic::set_weekly(&mut pool, &bus, actor, user, shifts)?;
            success(format!("Schedule of '{user}' saved"));
            if *show {
                print_schedule(&schedule);
            }
            return Ok(());
        }

        let schedule = ScheduleLogic::load(&pool, actor, user)?;
        if schedule.is_empty() {
            info(format!("No schedule set for '{user}'."));
        } else {
            print_schedule(&schedule);
        }
    }
    Ok(())
}

fn print_schedule(schedule: &WeeklySchedule) {
    let mut table = Table::new(vec!["Day", "Start", "End", "Hours"]);
    for e in &schedule.entries {
        table.add_row(vec![
            weekday_name(e.day_of_week).to_string(),
            e.start_time.format("%H:%M").to_string(),
            e.end_time.format("%H:%M").to_string(),
            format_hours_label(e.minutes()),
        ]);
    }
    print!("{}", table.render());
}
