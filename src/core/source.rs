//! The seam between the aggregator and wherever clock events are stored.

use crate::errors::AppResult;
use crate::models::clock_event::ClockEvent;
use crate::models::event_status::EventStatus;
use crate::utils::date::DateBounds;
use chrono::NaiveDate;

/// Filter for an event fetch. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub user_id: Option<String>,
    /// Inclusive, from the start of the first day to the end of the last.
    pub range: Option<DateBounds>,
    pub status: Option<EventStatus>,
}

impl EventQuery {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Self::default()
        }
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.range = Some((day, day));
        self
    }

    pub fn within(mut self, range: Option<DateBounds>) -> Self {
        self.range = range;
        self
    }

    pub fn with_status(mut self, status: Option<EventStatus>) -> Self {
        self.status = status;
        self
    }
}

/// Read side of the event store. A failed fetch is an error, never an
/// empty list.
pub trait EventSource {
    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<ClockEvent>>;
}

/// Fixed snapshot of events, filtered in memory.
impl EventSource for Vec<ClockEvent> {
    fn fetch_events(&self, query: &EventQuery) -> AppResult<Vec<ClockEvent>> {
        Ok(self
            .iter()
            .filter(|e| query.user_id.as_deref().is_none_or(|u| e.user_id == u))
            .filter(|e| {
                query
                    .range
                    .is_none_or(|(from, to)| e.date() >= from && e.date() <= to)
            })
            .filter(|e| query.status.is_none_or(|s| e.status == s))
            .cloned()
            .collect())
    }
}
