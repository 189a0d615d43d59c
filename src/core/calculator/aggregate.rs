//! Work-time aggregation: turns a raw collection of punches into worked
//! minutes per calendar day.
//!
//! The walk is a pure function of its input. Each employee's punches are
//! sorted chronologically (tie-break by id) and scanned once:
//!
//! - `entrada` opens a span keyed by its own calendar day; a repeated
//!   `entrada` restarts the span and drops the uncredited part.
//! - `saida_almoco` credits the pre-lunch segment, `volta_almoco` reopens
//!   the segment. Only the first lunch pair of a span is recognized.
//! - `saida` credits the open segment and closes the span.
//! - Spans that are never closed contribute nothing.
//!
//! Durations are whole minutes, clamped at zero.

use crate::models::clock_event::ClockEvent;
use crate::models::daily_summary::{DailySummary, WorkReport};
use crate::models::event_kind::EventKind;
use crate::models::event_status::EventStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_FLAT_THRESHOLD_MINUTES: i64 = 360;
pub const DEFAULT_FLAT_DEDUCTION_MINUTES: i64 = 60;

/// Which approval states take part in the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    NotRejected,
}

impl StatusFilter {
    pub fn accepts(&self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Approved => status == EventStatus::Aprovado,
            StatusFilter::NotRejected => status != EventStatus::Rejeitado,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "approved" | "aprovado" => Some(StatusFilter::Approved),
            "not-rejected" | "not_rejected" => Some(StatusFilter::NotRejected),
            _ => None,
        }
    }
}

/// How lunch time is removed from the worked total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LunchPolicy {
    /// Lunch carved out through `saida_almoco` / `volta_almoco` punches.
    #[default]
    ExplicitEvents,
    /// Lunch punches ignored; a flat deduction applies to any day whose
    /// entrada→saida total reaches the threshold.
    FlatDeduction {
        threshold_minutes: i64,
        deduction_minutes: i64,
    },
}

impl LunchPolicy {
    pub fn flat() -> Self {
        LunchPolicy::FlatDeduction {
            threshold_minutes: DEFAULT_FLAT_THRESHOLD_MINUTES,
            deduction_minutes: DEFAULT_FLAT_DEDUCTION_MINUTES,
        }
    }
}

/// Whether an open span may be closed on a later calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayBoundary {
    /// A punch on another day abandons the open span.
    #[default]
    Strict,
    /// Spans may cross midnight and are credited to the entrada's day.
    EntradaDay,
}

impl DayBoundary {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(DayBoundary::Strict),
            "entrada-day" | "entrada_day" => Some(DayBoundary::EntradaDay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    pub status_filter: StatusFilter,
    pub lunch_policy: LunchPolicy,
    pub day_boundary: DayBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lunch {
    NotTaken,
    Open,
    Taken,
}

#[derive(Debug)]
struct OpenSpan {
    day: NaiveDate,
    segment_start: NaiveDateTime,
    lunch: Lunch,
}

/// Aggregate worked minutes for every day present in `events`.
///
/// Punches of different employees never pair with each other; their daily
/// totals are summed.
pub fn aggregate(events: &[ClockEvent], options: &AggregateOptions) -> WorkReport {
    let mut merged: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for user_events in partition_by_user(events, options.status_filter).values() {
        for (day, minutes) in walk_user(user_events, options) {
            *merged.entry(day).or_insert(0) += minutes;
        }
    }

    into_report(merged)
}

/// Same as [`aggregate`] but keeps one report per employee.
pub fn aggregate_by_user(
    events: &[ClockEvent],
    options: &AggregateOptions,
) -> BTreeMap<String, WorkReport> {
    partition_by_user(events, options.status_filter)
        .into_iter()
        .map(|(user, user_events)| (user, into_report(walk_user(&user_events, options))))
        .collect()
}

fn partition_by_user(
    events: &[ClockEvent],
    filter: StatusFilter,
) -> BTreeMap<String, Vec<&ClockEvent>> {
    let mut by_user: BTreeMap<String, Vec<&ClockEvent>> = BTreeMap::new();
    for ev in events.iter().filter(|e| filter.accepts(e.status)) {
        by_user.entry(ev.user_id.clone()).or_default().push(ev);
    }
    by_user
}

fn walk_user(events: &[&ClockEvent], options: &AggregateOptions) -> BTreeMap<NaiveDate, i64> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| {
        a.requested_at
            .cmp(&b.requested_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let explicit_lunch = options.lunch_policy == LunchPolicy::ExplicitEvents;
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut open: Option<OpenSpan> = None;

    for ev in sorted {
        let at = ev.requested_at;

        let crosses_day = open.as_ref().is_some_and(|span| span.day != at.date());
        if crosses_day && options.day_boundary == DayBoundary::Strict {
            debug!(user = %ev.user_id, at = %at, "span abandoned at day boundary");
            open = None;
        }

        match ev.kind {
            EventKind::Entrada => {
                if open.is_some() {
                    debug!(user = %ev.user_id, at = %at, "repeated entrada restarts the open span");
                }
                open = Some(OpenSpan {
                    day: at.date(),
                    segment_start: at,
                    lunch: Lunch::NotTaken,
                });
            }
            EventKind::SaidaAlmoco if explicit_lunch => {
                if let Some(span) = open.as_mut()
                    && span.lunch == Lunch::NotTaken
                {
                    credit(&mut daily, span.day, span.segment_start, at);
                    span.lunch = Lunch::Open;
                }
            }
            EventKind::VoltaAlmoco if explicit_lunch => {
                if let Some(span) = open.as_mut()
                    && span.lunch == Lunch::Open
                {
                    span.segment_start = at;
                    span.lunch = Lunch::Taken;
                }
            }
            EventKind::SaidaAlmoco | EventKind::VoltaAlmoco => {}
            EventKind::Saida => match open.take() {
                Some(span) if span.lunch != Lunch::Open => {
                    credit(&mut daily, span.day, span.segment_start, at);
                }
                Some(_) => {
                    debug!(user = %ev.user_id, at = %at, "saida during open lunch: nothing more to credit");
                }
                None => {
                    debug!(user = %ev.user_id, at = %at, "saida without entrada ignored");
                }
            },
        }
    }

    if let Some(span) = open {
        debug!(day = %span.day, "trailing open segment not credited");
    }

    if let LunchPolicy::FlatDeduction {
        threshold_minutes,
        deduction_minutes,
    } = options.lunch_policy
    {
        for minutes in daily.values_mut() {
            if *minutes >= threshold_minutes {
                *minutes = (*minutes - deduction_minutes).max(0);
            }
        }
    }

    daily
}

fn credit(
    daily: &mut BTreeMap<NaiveDate, i64>,
    day: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
) {
    let minutes = (end - start).num_minutes().max(0);
    *daily.entry(day).or_insert(0) += minutes;
}

fn into_report(daily: BTreeMap<NaiveDate, i64>) -> WorkReport {
    let daily_summaries: Vec<DailySummary> = daily
        .into_iter()
        .map(|(date, minutes)| DailySummary::new(date, minutes))
        .collect();
    let total_minutes = daily_summaries.iter().map(|s| s.total_minutes).sum();

    WorkReport {
        daily_summaries,
        total_minutes,
    }
}
