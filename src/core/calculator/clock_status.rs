//! Where an employee stands in the working day, derived from that day's
//! punches, and which punch may come next.

use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockStatus {
    pub is_clocked_in: bool,
    pub is_on_lunch: bool,
    pub has_clocked_in_today: bool,
    pub has_clocked_out_today: bool,
    pub has_taken_lunch_today: bool,
    pub last_action: Option<NaiveDateTime>,
}

impl ClockStatus {
    /// Build the status from one employee's punches of one day, in any order.
    pub fn from_events(events: &[ClockEvent]) -> Self {
        let mut sorted: Vec<&ClockEvent> = events.iter().collect();
        sorted.sort_by(|a, b| {
            a.requested_at
                .cmp(&b.requested_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let Some(last) = sorted.last() else {
            return Self::default();
        };

        let (is_clocked_in, is_on_lunch) = match last.kind {
            EventKind::Entrada | EventKind::VoltaAlmoco => (true, false),
            EventKind::SaidaAlmoco => (true, true),
            EventKind::Saida => (false, false),
        };

        Self {
            is_clocked_in,
            is_on_lunch,
            has_clocked_in_today: sorted.iter().any(|e| e.kind == EventKind::Entrada),
            has_clocked_out_today: sorted.iter().any(|e| e.kind == EventKind::Saida),
            has_taken_lunch_today: sorted.iter().any(|e| e.kind == EventKind::SaidaAlmoco),
            last_action: Some(last.requested_at),
        }
    }

    /// Punches accepted in the current state.
    pub fn allowed_actions(&self) -> Vec<EventKind> {
        if self.is_on_lunch {
            vec![EventKind::VoltaAlmoco]
        } else if self.is_clocked_in {
            if self.has_taken_lunch_today {
                vec![EventKind::Saida]
            } else {
                vec![EventKind::SaidaAlmoco, EventKind::Saida]
            }
        } else {
            vec![EventKind::Entrada]
        }
    }

    pub fn check(&self, kind: EventKind) -> AppResult<()> {
        let allowed = self.allowed_actions();
        if allowed.contains(&kind) {
            return Ok(());
        }

        let names: Vec<&str> = allowed.iter().map(|k| k.to_db_str()).collect();
        Err(AppError::InvalidTransition(format!(
            "'{}' not allowed now (allowed: {})",
            kind,
            names.join(", ")
        )))
    }

    pub fn describe(&self) -> &'static str {
        if self.is_on_lunch {
            "on lunch break"
        } else if self.is_clocked_in {
            "clocked in"
        } else if self.has_clocked_out_today {
            "clocked out"
        } else {
            "not clocked in"
        }
    }
}
