//! In-process "data changed" notifications.
//!
//! Writers publish a [`DataChange`] after a successful mutation; views
//! subscribe and decide for themselves whether to refetch. The aggregator
//! never sees the bus.

use crate::models::event_status::EventStatus;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataChange {
    EventRecorded { user_id: String, date: NaiveDate },
    EventDecided {
        event_id: i64,
        user_id: String,
        status: EventStatus,
    },
    HistoryCleared { user_id: String },
    ScheduleChanged { user_id: String },
    ProfilesChanged,
}

impl DataChange {
    /// Whether worked-time figures of `user` (or of everyone, when `None`)
    /// may have changed.
    pub fn affects_events_of(&self, user: Option<&str>) -> bool {
        let changed_user = match self {
            DataChange::EventRecorded { user_id, .. }
            | DataChange::EventDecided { user_id, .. }
            | DataChange::HistoryCleared { user_id } => user_id.as_str(),
            DataChange::ScheduleChanged { .. } | DataChange::ProfilesChanged => return false,
        };
        user.is_none_or(|u| u == changed_user)
    }
}

pub type SubscriptionId = u64;

type Callback = Box<dyn Fn(&DataChange) + Send + Sync>;

#[derive(Default)]
pub struct DataChangeBus {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl DataChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DataChange) + Send + Sync + 'static,
    {
        self.next_id += 1;
        self.subscribers.push((self.next_id, Box::new(callback)));
        self.next_id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&self, change: &DataChange) {
        tracing::debug!(?change, subscribers = self.subscribers.len(), "data change published");
        for (_, callback) in &self.subscribers {
            callback(change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
