//! In-process change feed
//!
//! Subscribers register for one budget and receive its events over an
//! `mpsc` channel. Dropping a [`Subscription`] unregisters it.

use std::sync::{mpsc, Arc, Mutex, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use super::event::ChangeEvent;
use crate::error::{BudgetResult, SharedBudgetError};
use crate::models::BudgetId;

struct Subscriber {
    id: u64,
    budget_id: BudgetId,
    sender: mpsc::Sender<ChangeEvent>,
}

#[derive(Default)]
struct FeedInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Publishes change events to per-budget subscribers
#[derive(Clone, Default)]
pub struct ChangeFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving events for `budget_id`
    pub fn subscribe(&self, budget_id: BudgetId) -> BudgetResult<Subscription> {
        let (sender, receiver) = mpsc::channel();
        let mut inner = self.inner.lock().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire feed lock: {}", e))
        })?;

        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            budget_id,
            sender,
        });
        debug!(subscription = id, budget = %budget_id, "Subscribed to budget changes");

        Ok(Subscription {
            id,
            budget_id,
            receiver,
            feed: Arc::downgrade(&self.inner),
        })
    }

    /// Deliver `event` to every subscriber of its budget.
    ///
    /// Returns the number of subscribers reached. Subscribers whose receiver
    /// is gone are pruned.
    pub fn publish(&self, event: &ChangeEvent) -> BudgetResult<usize> {
        let budget_id = event.budget_id();
        let mut inner = self.inner.lock().map_err(|e| {
            SharedBudgetError::Storage(format!("Failed to acquire feed lock: {}", e))
        })?;

        let mut delivered = 0;
        inner.subscribers.retain(|sub| {
            if sub.budget_id != budget_id {
                return true;
            }
            match sub.sender.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });

        trace!(event = event.kind(), budget = %budget_id, delivered, "Published change");
        Ok(delivered)
    }

    /// Number of live subscriptions across all budgets
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.subscribers.len())
            .unwrap_or(0)
    }
}

/// A registration for one budget's events
pub struct Subscription {
    id: u64,
    budget_id: BudgetId,
    receiver: mpsc::Receiver<ChangeEvent>,
    feed: Weak<Mutex<FeedInner>>,
}

impl Subscription {
    pub fn budget_id(&self) -> BudgetId {
        self.budget_id
    }

    /// Next pending event, if any, without blocking
    pub fn try_next(&self) -> Option<ChangeEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn next_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// All pending events, oldest first
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.upgrade() {
            if let Ok(mut inner) = feed.lock() {
                inner.subscribers.retain(|sub| sub.id != self.id);
            }
        }
        debug!(subscription = self.id, "Unsubscribed from budget changes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_only_their_budget() {
        let feed = ChangeFeed::new();
        let family = BudgetId::new();
        let holiday = BudgetId::new();

        let family_sub = feed.subscribe(family).unwrap();
        let holiday_sub = feed.subscribe(holiday).unwrap();

        let delivered = feed.publish(&ChangeEvent::MembersChanged(family)).unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(
            family_sub.try_next(),
            Some(ChangeEvent::MembersChanged(family))
        );
        assert!(holiday_sub.try_next().is_none());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let feed = ChangeFeed::new();
        let family = BudgetId::new();

        let sub = feed.subscribe(family).unwrap();
        assert_eq!(feed.subscriber_count(), 1);

        drop(sub);
        assert_eq!(feed.subscriber_count(), 0);
        assert_eq!(feed.publish(&ChangeEvent::BudgetDeleted(family)).unwrap(), 0);
    }

    #[test]
    fn test_drain_preserves_order() {
        let feed = ChangeFeed::new();
        let family = BudgetId::new();
        let sub = feed.subscribe(family).unwrap();

        feed.publish(&ChangeEvent::MembersChanged(family)).unwrap();
        feed.publish(&ChangeEvent::BudgetDeleted(family)).unwrap();

        let events = sub.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ChangeEvent::BudgetDeleted(family));
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_subscription_outlives_feed() {
        let family = BudgetId::new();
        let sub = {
            let feed = ChangeFeed::new();
            feed.subscribe(family).unwrap()
        };
        assert!(sub.try_next().is_none());
        drop(sub);
    }

    #[test]
    fn test_cross_thread_delivery() {
        let feed = ChangeFeed::new();
        let family = BudgetId::new();
        let sub = feed.subscribe(family).unwrap();

        let publisher = feed.clone();
        std::thread::spawn(move || {
            publisher
                .publish(&ChangeEvent::MembersChanged(family))
                .unwrap();
        })
        .join()
        .unwrap();

        assert!(sub.next_timeout(Duration::from_secs(1)).is_some());
    }
}
