use super::{event_kind::EventKind, event_status::EventStatus, location::Location};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClockEvent {
    pub id: i64,                          // ⇔ pontos.id
    pub user_id: String,                  // ⇔ pontos.user_id
    pub kind: EventKind,                  // ⇔ pontos.kind
    pub requested_at: NaiveDateTime,      // ⇔ pontos.requested_at (local wall clock)
    pub status: EventStatus,              // ⇔ pontos.status
    pub approved_at: Option<NaiveDateTime>,
    pub approver_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_url: Option<String>,
    pub created_at: String, // RFC 3339
}

impl ClockEvent {
    /// A fresh punch as recorded by the clock flow:
    /// - `id = 0` (assigned by the database on insert)
    /// - `status = pendente`, no approval metadata
    /// - `created_at = now()` in RFC 3339
    pub fn new(user_id: &str, kind: EventKind, requested_at: NaiveDateTime) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            kind,
            requested_at,
            status: EventStatus::Pendente,
            approved_at: None,
            approver_id: None,
            latitude: None,
            longitude: None,
            photo_url: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.latitude = location.map(|l| l.latitude);
        self.longitude = location.map(|l| l.longitude);
        self
    }

    pub fn with_photo(mut self, photo_url: Option<String>) -> Self {
        self.photo_url = photo_url;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.requested_at.date()
    }

    pub fn date_str(&self) -> String {
        self.requested_at.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.requested_at.format("%H:%M:%S").to_string()
    }

    pub fn timestamp_str(&self) -> String {
        self.requested_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn location(&self) -> Option<Location> {
        Location::from_parts(self.latitude, self.longitude)
    }
}
