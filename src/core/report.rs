use crate::core::bus::{DataChangeBus, SubscriptionId};
use crate::core::calculator::aggregate::{AggregateOptions, aggregate, aggregate_by_user};
use crate::core::source::{EventQuery, EventSource};
use crate::errors::AppResult;
use crate::models::daily_summary::WorkReport;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct ReportLogic;

impl ReportLogic {
    /// Fetch a snapshot and aggregate it. Fetch errors propagate untouched.
    pub fn build(
        source: &dyn EventSource,
        query: &EventQuery,
        options: &AggregateOptions,
    ) -> AppResult<WorkReport> {
        let events = source.fetch_events(query)?;
        tracing::debug!(events = events.len(), ?query, "aggregating");
        Ok(aggregate(&events, options))
    }

    pub fn build_by_user(
        source: &dyn EventSource,
        query: &EventQuery,
        options: &AggregateOptions,
    ) -> AppResult<BTreeMap<String, WorkReport>> {
        let events = source.fetch_events(query)?;
        Ok(aggregate_by_user(&events, options))
    }
}

/// A report that recomputes from scratch after a relevant data change.
pub struct LiveReport {
    query: EventQuery,
    options: AggregateOptions,
    stale: Arc<AtomicBool>,
    cached: Option<WorkReport>,
    subscription: Option<SubscriptionId>,
}

impl LiveReport {
    pub fn new(query: EventQuery, options: AggregateOptions) -> Self {
        Self {
            query,
            options,
            stale: Arc::new(AtomicBool::new(true)),
            cached: None,
            subscription: None,
        }
    }

    /// Listen for changes touching this report's employee.
    pub fn attach(&mut self, bus: &mut DataChangeBus) {
        let stale = Arc::clone(&self.stale);
        let user = self.query.user_id.clone();
        let id = bus.subscribe(move |change| {
            if change.affects_events_of(user.as_deref()) {
                stale.store(true, Ordering::SeqCst);
            }
        });
        self.subscription = Some(id);
    }

    pub fn detach(&mut self, bus: &mut DataChangeBus) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// The cached report, refetched first when stale. On a failed fetch the
    /// report stays stale and the error is returned.
    pub fn current(&mut self, source: &dyn EventSource) -> AppResult<&WorkReport> {
        if self.is_stale() || self.cached.is_none() {
            let report = ReportLogic::build(source, &self.query, &self.options)?;
            self.cached = Some(report);
            self.stale.store(false, Ordering::SeqCst);
        }
        Ok(&*self.cached.get_or_insert_with(WorkReport::default))
    }
}
