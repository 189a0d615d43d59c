pub mod clock_event;
pub mod daily_summary;
pub mod event_kind;
pub mod event_status;
pub mod location;
pub mod profile;
pub mod schedule;
