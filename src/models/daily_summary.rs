use crate::utils::formatting::format_hours_label;
use chrono::NaiveDate;
use serde::Serialize;

/// Worked minutes for one calendar day. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_minutes: i64,
    pub total_hours_label: String,
}

impl DailySummary {
    pub fn new(date: NaiveDate, total_minutes: i64) -> Self {
        let total_minutes = total_minutes.max(0);
        Self {
            date,
            total_minutes,
            total_hours_label: format_hours_label(total_minutes),
        }
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkReport {
    pub daily_summaries: Vec<DailySummary>,
    pub total_minutes: i64,
}

impl WorkReport {
    pub fn total_hours_label(&self) -> String {
        format_hours_label(self.total_minutes)
    }

    /// Minutes worked on `date`; 0 when the day has no credited segment.
    pub fn minutes_for(&self, date: NaiveDate) -> i64 {
        self.daily_summaries
            .iter()
            .find(|s| s.date == date)
            .map(|s| s.total_minutes)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.daily_summaries.is_empty()
    }
}
