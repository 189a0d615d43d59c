use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bus::DataChangeBus;
use crate::core::clock::{ClockLogic, PunchRequest};
use crate::core::report::LiveReport;
use crate::core::source::EventQuery;
use crate::errors::{AppError, AppResult};
use crate::models::event_kind::EventKind;
use crate::models::location::Location;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_hours_label;
use crate::utils::time::resolve_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        kind,
        at,
        lat,
        lon,
        photo,
    } = cmd
    {
        let user = cfg.acting_user()?;
        let kind = EventKind::parse(kind).ok_or_else(|| AppError::InvalidEventKind(kind.clone()))?;
        let at = resolve_timestamp(at.as_ref())?;
        let pool = open_db(cfg)?;

        let mut bus = DataChangeBus::new();
        let mut today = LiveReport::new(
            EventQuery::for_user(user).on_day(at.date()),
            cfg.aggregate_options(),
        );
        today.attach(&mut bus);

        let event = ClockLogic::punch(
            &pool,
            &bus,
            cfg,
            PunchRequest {
                user_id: user.to_string(),
                kind,
                at,
                location: Location::from_parts(*lat, *lon),
                photo_url: photo.clone(),
            },
        )?;

        success(format!(
            "{} recorded at {} (id {}, {})",
            event.kind.label(),
            event.timestamp_str(),
            event.id,
            event.status
        ));

        let worked = today.current(&pool)?.minutes_for(at.date());
        info(format!(
            "Worked on {}: {}",
            at.date(),
            format_hours_label(worked)
        ));
        today.detach(&mut bus);
    }
    Ok(())
}
