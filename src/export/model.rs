use crate::models::clock_event::ClockEvent;
use crate::models::daily_summary::DailySummary;
use crate::utils::formatting::decimal_hours;
use serde::Serialize;

/// Flat row of the punch export.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub employee: String,
    /// `dd/mm/yyyy`
    pub date: String,
    pub time: String,
    pub kind: String,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_url: Option<String>,
    pub approver: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl EventExport {
    pub fn from_event(ev: &ClockEvent, employee: &str, approver: Option<String>) -> Self {
        Self {
            id: ev.id,
            employee: employee.to_string(),
            date: ev.requested_at.format("%d/%m/%Y").to_string(),
            time: ev.time_str(),
            kind: ev.kind.label().to_string(),
            status: ev.status.to_db_str().to_string(),
            latitude: ev.latitude,
            longitude: ev.longitude,
            photo_url: ev.photo_url.clone(),
            approver,
            approved_at: ev
                .approved_at
                .map(|t| t.format("%d/%m/%Y %H:%M:%S").to_string()),
            created_at: ev.created_at.clone(),
        }
    }
}

/// One employee-day of the aggregated report.
#[derive(Serialize, Clone, Debug)]
pub struct ReportRowExport {
    pub employee: String,
    pub date: String,
    pub minutes: i64,
    pub hours: String,
    pub decimal_hours: f64,
}

impl ReportRowExport {
    pub fn from_summary(employee: &str, s: &DailySummary) -> Self {
        Self {
            employee: employee.to_string(),
            date: s.date.format("%Y-%m-%d").to_string(),
            minutes: s.total_minutes,
            hours: s.total_hours_label.clone(),
            decimal_hours: decimal_hours(s.total_minutes),
        }
    }
}
